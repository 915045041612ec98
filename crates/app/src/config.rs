//! Command-line options and configuration selection

use std::path::PathBuf;

use signature_config::SignatureConfig;
use tracing::info;

use crate::ReplayError;

const USAGE: &str = "usage: signature-replay <script.json> <out.png> [config.json]";

/// Environment variable naming a config file when none is passed
const CONFIG_ENV: &str = "SIGNATURE_CONFIG";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOptions {
    pub script: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

impl ReplayOptions {
    /// Parse positional arguments (program name already skipped)
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ReplayError> {
        let mut args = args.into_iter();
        let (Some(script), Some(output)) = (args.next(), args.next()) else {
            return Err(ReplayError::Usage(USAGE));
        };
        let config = args.next().map(PathBuf::from);
        if args.next().is_some() {
            return Err(ReplayError::Usage(USAGE));
        }

        Ok(Self {
            script: script.into(),
            output: output.into(),
            config,
        })
    }

    /// Config path from the arguments, falling back to SIGNATURE_CONFIG
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load the selected config, or defaults when none is selected
    pub fn load_config(&self) -> Result<SignatureConfig, ReplayError> {
        match self.config_path() {
            Some(path) => {
                info!("Loading config from {:?}", path);
                Ok(SignatureConfig::load(&path)?)
            }
            None => Ok(SignatureConfig::default()),
        }
    }
}
