//! develop-core: build orchestration for the develop driver
//!
//! This crate decides how to invoke the project generator and the native
//! build tools on each supported platform: build directory layout and
//! lifecycle, generator command construction, and parallelism estimation
//! for distributed compiles.

mod command;
mod config;
mod dirs;
mod distcc;
mod error;
mod strategy;

pub use command::{cmake_command, quote_opts, validate_generator};
pub use config::{BuildConfig, BuildType, Jobs};
pub use dirs::{build_dirs, clean, ensure_created};
pub use distcc::ParallelismEstimator;
pub use error::CoreError;
pub use strategy::PlatformStrategy;

// Re-export the identity types so callers rarely need develop-platform
// directly.
pub use develop_platform::{Arch, Os, PlatformIdentity};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
