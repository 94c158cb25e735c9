//! Error types for develop-core

use thiserror::Error;

use crate::config::BuildType;
use develop_platform::{Os, PlatformError};

/// Errors that can occur in build orchestration
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown build type '{name}' (supported: {})", BuildType::supported_names())]
    UnknownBuildType { name: String },

    #[error("unknown generator '{name}' (supported: vs2022, vs2022-clang)")]
    UnknownGenerator { name: String },

    #[error("build directory {dir} does not exist; run 'develop configure' first")]
    MissingPrerequisite { dir: String },

    #[error("the build command only drives compiles on linux; on {os} use the generated project files")]
    BuildUnsupported { os: Os },

    #[error("failed to create build directory {dir}: {source}")]
    DirectoryCreationFailed {
        dir: String,
        source: std::io::Error,
    },
}
