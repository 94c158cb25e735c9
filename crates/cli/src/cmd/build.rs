//! Implementation of the `develop build` command.

use std::env;
use std::fs;

use anyhow::Result;
use tracing::info;

use develop_core::{CoreError, ParallelismEstimator, PlatformStrategy};

/// Execute the build command.
///
/// Requires an earlier `configure` to have produced the build directories,
/// then refreshes the generator output and drives the build tool with the
/// estimated (or explicitly requested) parallelism.
pub fn cmd_build(
    strategy: &PlatformStrategy,
    options: &[String],
    targets: &[String],
) -> Result<()> {
    for dir in strategy.build_dirs() {
        if !dir.is_dir() {
            return Err(CoreError::MissingPrerequisite {
                dir: dir.display().to_string(),
            }
            .into());
        }
    }

    if strategy.config().distcc {
        ensure_distcc_dir()?;
    }

    // Pick up any source or configuration changes before compiling.
    strategy.configure(&[])?;

    let estimator = ParallelismEstimator::from_env();
    strategy.build(&estimator, options, targets)?;
    Ok(())
}

/// Give distcc a state directory when the caller has not set one up
fn ensure_distcc_dir() -> Result<()> {
    if let Some(dir) = env::var_os("DISTCC_DIR") {
        info!(dir = %dir.to_string_lossy(), "DISTCC_DIR already set");
        return Ok(());
    }
    let dir = env::current_dir()?.join(".distcc");
    if !dir.exists() {
        fs::create_dir(&dir)?;
    }
    println!("setting DISTCC_DIR to {}", dir.display());
    // SAFETY: the driver is single-threaded; no concurrent env access.
    unsafe { env::set_var("DISTCC_DIR", &dir) };
    Ok(())
}
