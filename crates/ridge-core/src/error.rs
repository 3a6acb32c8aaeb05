//! Error types for Ridge

use thiserror::Error;

/// The main error type for terrain generation and configuration
#[derive(Debug, Error)]
pub enum RidgeError {
    #[error("Invalid grid size: {width}x{depth} (each side needs at least 2 vertices)")]
    InvalidGridSize { width: u32, depth: u32 },

    #[error("Grid of {width}x{depth} vertices does not fit 32-bit indices")]
    GridTooLarge { width: u32, depth: u32 },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type alias for Ridge operations
pub type Result<T> = std::result::Result<T, RidgeError>;

impl From<toml::de::Error> for RidgeError {
    fn from(err: toml::de::Error) -> Self {
        RidgeError::TomlParse(err.to_string())
    }
}
