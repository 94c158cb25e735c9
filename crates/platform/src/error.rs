//! Error types for develop-platform

use thiserror::Error;

use crate::process::FailureReason;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("the command '{name}' {reason}")]
    CommandFailed { name: String, reason: FailureReason },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
