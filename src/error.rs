//! Startup errors
//!
//! The simulation itself has no error paths; everything that can go wrong
//! is caught while loading and validating settings.

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Screen too small for the brick wall (or zero)
    #[error("Invalid screen bounds {width}x{height} (minimum {min_width}x{min_height})")]
    InvalidBounds {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },
}
