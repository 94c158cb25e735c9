//! Scoped working-directory handling
//!
//! The generator has to be run from inside each build directory, and the
//! working directory is process-global state. [`CwdGuard`] guarantees the
//! caller's directory is restored on every exit path, including errors.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// RAII guard that restores the saved working directory on drop
#[derive(Debug)]
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(Self { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.original) {
            warn!(
                dir = %self.original.display(),
                error = %err,
                "failed to restore working directory"
            );
        }
    }
}

/// Current working directory with any DOS drive-letter prefix upper-cased.
///
/// The generator wants `C:` rather than `c:`. Paths on platforms that start
/// with a slash never match the drive-letter pattern, so no OS check is
/// needed.
pub fn normalized_cwd() -> io::Result<PathBuf> {
    Ok(upper_drive(env::current_dir()?))
}

fn upper_drive(path: PathBuf) -> PathBuf {
    let s = path.to_string_lossy();
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_lowercase() && bytes[1] == b':' {
        let mut fixed = String::with_capacity(s.len());
        fixed.push(bytes[0].to_ascii_uppercase() as char);
        fixed.push_str(&s[1..]);
        PathBuf::from(fixed)
    } else {
        path
    }
}
