//! Build directory layout and lifecycle
//!
//! Directory names are a pure function of the platform identity and the
//! build configuration. Creation tracks which directories were new so a
//! failed configure can roll back without touching pre-existing ones.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::error::CoreError;
use develop_platform::{Os, PlatformIdentity};

/// Compute the build directories for a platform and configuration.
///
/// Naming policy per platform:
/// - generic unix / darwin: `../build-<os>[-<arch>]`
/// - linux: `../viewer-<os>-<arch>-<buildtype>` (lower-cased build type)
/// - windows / cygwin: `../build-<generator>`
pub fn build_dirs(identity: &PlatformIdentity, config: &BuildConfig) -> Vec<PathBuf> {
    let name = match identity.os {
        Os::Linux => format!("viewer-{}-{}", identity.label(), config.build_type.dir_label()),
        Os::Unix | Os::Darwin => format!("build-{}", identity.label()),
        Os::Windows | Os::Cygwin => format!("build-{}", config.generator),
    };
    vec![Path::new("..").join(name)]
}

/// Create every directory in the set that does not yet exist.
///
/// Returns only the newly created directories. If creation fails partway,
/// the directories created so far are removed before the error is returned,
/// so the set is never left half-initialized.
pub fn ensure_created(dirs: &[PathBuf]) -> Result<Vec<PathBuf>, CoreError> {
    let mut created = Vec::new();
    for dir in dirs {
        match create_if_absent(dir) {
            Ok(true) => {
                debug!(dir = %dir.display(), "created build directory");
                created.push(dir.clone());
            }
            Ok(false) => {}
            Err(err) => {
                remove_created(&created);
                return Err(CoreError::DirectoryCreationFailed {
                    dir: dir.display().to_string(),
                    source: err,
                });
            }
        }
    }
    Ok(created)
}

/// Best-effort rollback of directories created during a failed operation.
///
/// They only ever contain garbage from the aborted run, so removal failures
/// are logged and otherwise ignored: the original error must stay the one
/// the caller sees.
pub fn remove_created(created: &[PathBuf]) {
    for dir in created {
        info!(dir = %dir.display(), "cleaning up directory from failed run");
        if let Err(err) = fs::remove_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), error = %err, "rollback removal failed");
        }
    }
}

/// Delete every directory in the set that exists; returns how many were
/// removed. None existing is not an error.
pub fn clean(dirs: &[PathBuf]) -> Result<usize, CoreError> {
    let mut removed = 0;
    for dir in dirs {
        if dir.is_dir() {
            info!(dir = %dir.display(), "removing build directory");
            fs::remove_dir_all(dir)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn create_if_absent(dir: &Path) -> io::Result<bool> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildType;
    use develop_platform::Arch;
    use tempfile::TempDir;

    fn linux_identity() -> PlatformIdentity {
        PlatformIdentity::new(Os::Linux, Some(Arch::X86_64))
    }

    #[test]
    fn linux_dir_embeds_build_type() {
        let mut config = BuildConfig::for_os(Os::Linux);
        config.build_type = BuildType::RelWithDebInfo;
        let dirs = build_dirs(&linux_identity(), &config);
        assert_eq!(
            dirs,
            vec![Path::new("..").join("viewer-linux-x86_64-relwithdebinfo")]
        );
    }

    #[test]
    fn unix_and_darwin_dirs_use_platform_label() {
        let config = BuildConfig::for_os(Os::Unix);
        let identity = PlatformIdentity::new(Os::Unix, Some(Arch::Aarch64));
        assert_eq!(
            build_dirs(&identity, &config),
            vec![Path::new("..").join("build-unix-aarch64")]
        );

        let config = BuildConfig::for_os(Os::Darwin);
        let identity = PlatformIdentity::new(Os::Darwin, Some(Arch::Aarch64));
        assert_eq!(
            build_dirs(&identity, &config),
            vec![Path::new("..").join("build-darwin-aarch64")]
        );
    }

    #[test]
    fn windows_dir_uses_generator_not_os() {
        let mut config = BuildConfig::for_os(Os::Windows);
        config.generator = "vs2022-clang".to_string();
        let identity = PlatformIdentity::for_os(Os::Windows);
        assert_eq!(
            build_dirs(&identity, &config),
            vec![Path::new("..").join("build-vs2022-clang")]
        );
    }

    #[test]
    fn build_dirs_is_deterministic() {
        let config = BuildConfig::for_os(Os::Linux);
        let identity = linux_identity();
        assert_eq!(build_dirs(&identity, &config), build_dirs(&identity, &config));
    }

    #[test]
    fn ensure_created_reports_only_new_dirs() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("existing");
        fs::create_dir(&existing).unwrap();
        let fresh = temp.path().join("fresh");

        let dirs = vec![existing.clone(), fresh.clone()];
        let created = ensure_created(&dirs).unwrap();
        assert_eq!(created, vec![fresh.clone()]);
        assert!(existing.is_dir());
        assert!(fresh.is_dir());

        // Idempotent: a second call creates (and reports) nothing.
        let created = ensure_created(&dirs).unwrap();
        assert!(created.is_empty());
    }

    #[test]
    fn ensure_created_rolls_back_partial_failure() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good");
        // Parent of this one does not exist, so plain create_dir fails.
        let bad = temp.path().join("no-such-parent").join("bad");

        let err = ensure_created(&[good.clone(), bad]).unwrap_err();
        assert!(matches!(err, CoreError::DirectoryCreationFailed { .. }));
        assert!(!good.exists(), "partially created directory must be removed");
    }

    #[test]
    fn clean_counts_removed_dirs() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::write(a.join("stale.o"), b"x").unwrap();

        assert_eq!(clean(&[a.clone(), b.clone()]).unwrap(), 1);
        assert!(!a.exists());

        // Nothing left: zero removed, no error.
        assert_eq!(clean(&[a, b]).unwrap(), 0);
    }
}
