//! Generation and configuration errors

use thiserror::Error;

/// Failures that abort a generation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A projection or line endpoint left the grid
    #[error("coordinate ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Every attempt allowed by the retry cap failed
    #[error("generation failed {attempts} times in a row (last seed {last_seed})")]
    RetriesExhausted { attempts: u32, last_seed: u64 },
}

impl GenError {
    /// Whether the caller may retry with another seed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenError::OutOfBounds { .. })
    }
}

pub type GenResult<T> = Result<T, GenError>;

/// Errors while loading or validating a [`crate::TownConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
