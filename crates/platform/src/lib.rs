//! Platform detection and process abstractions for the develop build driver
//!
//! This crate provides the pieces of the build driver that talk directly to
//! the operating system:
//! - OS and architecture detection
//! - Blocking shell command execution with structured failure classification
//! - Scoped save/restore of the process working directory

mod cwd;
mod error;
mod platform;
mod process;

pub use cwd::{CwdGuard, normalized_cwd};
pub use error::PlatformError;
pub use platform::{Arch, Os, PlatformIdentity};
pub use process::{FailureReason, ProcessOutcome, capture_stdout, run_shell};

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
