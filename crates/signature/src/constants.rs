/// Background of every rasterized signature, regardless of surface theme.
pub const BACKGROUND_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Rasterized ink colour.
pub const INK_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Width of the anti-aliasing ramp at a stroke edge, in pixels.
pub const AA_RAMP_WIDTH: f32 = 1.0;

/// Distance under which a move sample counts as a repeat of the previous one.
/// Repeats are still recorded; the preview just skips the degenerate segment.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-3;
