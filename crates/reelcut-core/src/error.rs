//! Error types for reelcut.

use std::path::PathBuf;
use thiserror::Error;

use crate::time::Duration;

/// Main error type for reelcut operations.
#[derive(Error, Debug)]
pub enum ReelcutError {
    #[error("Invalid time format '{input}': {reason}. Use HH:MM:SS or MM:SS")]
    InvalidFormat { input: String, reason: String },

    #[error("The file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("No media files found in {}", .0.display())]
    NoMediaFound(PathBuf),

    #[error("Invalid time range: end {end} is not after start {start}")]
    InvalidTimeRange { start: Duration, end: Duration },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{tool} failed: {reason}")]
    ExternalToolFailure { tool: String, reason: String },

    #[error("Scratch file {}: {source}", .path.display())]
    ScratchIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReelcutError {
    /// Shorthand for a malformed duration string.
    pub fn invalid_format(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error was detected before any external process ran.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::MissingFile(_)
                | Self::NoMediaFound(_)
                | Self::InvalidTimeRange { .. }
                | Self::InvalidParameter(_)
                | Self::Config(_)
        )
    }

    /// Process exit code: 1 for usage/validation errors, 2 for execution errors.
    pub fn exit_code(&self) -> u8 {
        if self.is_precondition() {
            1
        } else {
            2
        }
    }
}

/// Result type alias for reelcut operations.
pub type Result<T> = std::result::Result<T, ReelcutError>;
