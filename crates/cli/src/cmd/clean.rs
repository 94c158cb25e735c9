//! Implementation of the `develop clean` command.

use anyhow::Result;

use develop_core::PlatformStrategy;

/// Execute the clean command.
///
/// Removes every existing build directory; finding nothing to remove is
/// informational, not an error.
pub fn cmd_clean(strategy: &PlatformStrategy) -> Result<()> {
    let removed = strategy.clean()?;
    if removed == 0 {
        println!("Nothing to clean up!");
    } else if removed == 1 {
        println!("Removed 1 build directory");
    } else {
        println!("Removed {removed} build directories");
    }
    Ok(())
}
