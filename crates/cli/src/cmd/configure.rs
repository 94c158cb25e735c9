//! Implementation of the `develop configure` command.

use anyhow::Result;
use owo_colors::OwoColorize;

use develop_core::PlatformStrategy;

/// Execute the configure command.
///
/// Runs the generator in every build directory for the current platform
/// and configuration, creating the directories first; on failure the ones
/// created by this run are removed again.
pub fn cmd_configure(strategy: &PlatformStrategy, opts: &[String]) -> Result<()> {
    strategy.configure(opts)?;
    for dir in strategy.build_dirs() {
        println!("{} configured {}", "::".cyan().bold(), dir.display());
    }
    Ok(())
}
