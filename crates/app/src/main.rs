//! Signature replay - finalize a recorded gesture script into a PNG

use std::process::ExitCode;

use signature_config::ConfigError;
use signature_pad::{EncodeError, PNG_DATA_URI_PREFIX, RasterizeError, SignatureSession};
use tracing::{error, info};

mod config;
mod script;

use config::ReplayOptions;
use script::ReplayScript;

/// Errors that can end a replay run
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot finalize signature: {0}")]
    Rasterize(#[from] RasterizeError),

    #[error("Cannot encode signature: {0}")]
    Encode(#[from] EncodeError),
}

/// Install the stdout subscriber; RUST_LOG overrides the default filter
fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,signature_pad=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .init();
}

fn run(options: &ReplayOptions) -> Result<(), ReplayError> {
    let config = options.load_config()?;
    let script = ReplayScript::load(&options.script)?;

    let mut session = SignatureSession::new(config)?;
    script.play(&mut session);

    let image = session.finalize()?;
    let png = image.to_png()?;
    std::fs::write(&options.output, &png)?;

    info!(
        "Wrote {}x{} signature to {:?} ({} bytes, embed as {}<base64>)",
        image.width(),
        image.height(),
        options.output,
        png.len(),
        PNG_DATA_URI_PREFIX
    );
    session.dismiss();
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();

    let result = ReplayOptions::from_args(std::env::args().skip(1)).and_then(|o| run(&o));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
