//! Implementation of the `develop print-build-dirs` command.

use anyhow::Result;

use develop_core::PlatformStrategy;

/// Print the build directories the current configuration maps to, one per
/// line or as a JSON array.
pub fn cmd_print_build_dirs(strategy: &PlatformStrategy, json: bool) -> Result<()> {
    let dirs: Vec<String> = strategy
        .build_dirs()
        .iter()
        .map(|dir| dir.display().to_string())
        .collect();
    if json {
        println!("{}", serde_json::to_string(&dirs)?);
    } else {
        for dir in &dirs {
            println!("{dir}");
        }
    }
    Ok(())
}
