//! Platform strategy: configure / build / clean
//!
//! A strategy is platform identity plus build configuration; every
//! operation is a single-shot, synchronous sequence composing the build
//! directory lifecycle, the generator command and the process runner.
//! There is no internal locking: callers serialize access to a build
//! directory set themselves.

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::command::{cmake_command, validate_generator};
use crate::config::BuildConfig;
use crate::dirs;
use crate::distcc::ParallelismEstimator;
use crate::error::CoreError;
use develop_platform::{CwdGuard, Os, PlatformIdentity, normalized_cwd, run_shell};

/// Build driver for one platform
#[derive(Debug, Clone)]
pub struct PlatformStrategy {
    identity: PlatformIdentity,
    config: BuildConfig,
}

impl PlatformStrategy {
    /// Strategy for an explicit OS (the identity's architecture is the
    /// host's)
    pub fn new(os: Os, config: BuildConfig) -> Self {
        Self {
            identity: PlatformIdentity::for_os(os),
            config,
        }
    }

    /// Strategy for the running host
    pub fn current(config: BuildConfig) -> Self {
        Self::new(Os::current(), config)
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn identity(&self) -> &PlatformIdentity {
        &self.identity
    }

    /// The build directories this configuration maps to
    pub fn build_dirs(&self) -> Vec<PathBuf> {
        dirs::build_dirs(&self.identity, &self.config)
    }

    /// Run the generator in every build directory, creating them as needed.
    ///
    /// On any failure, every directory created by this call is removed
    /// again (it only contains garbage from the aborted generator run);
    /// pre-existing directories are left untouched. The working directory
    /// is restored on all paths.
    pub fn configure(&self, extra_opts: &[String]) -> Result<(), CoreError> {
        validate_generator(self.identity.os, &self.config)?;

        let cwd = normalized_cwd()?;
        let build_dirs = self.build_dirs();
        let created = dirs::ensure_created(&build_dirs)?;

        let result = self.run_generator(&cwd.to_string_lossy(), &build_dirs, extra_opts);
        if result.is_err() {
            dirs::remove_created(&created);
        }
        result
    }

    fn run_generator(
        &self,
        src_dir: &str,
        build_dirs: &[PathBuf],
        extra_opts: &[String],
    ) -> Result<(), CoreError> {
        let src_dir = self.generator_source_dir(src_dir)?;
        let ambient_cxx = env::var("CXX").ok();
        let command = cmake_command(
            self.identity.os,
            &self.config,
            &src_dir,
            extra_opts,
            ambient_cxx.as_deref(),
        )?;
        for dir in build_dirs {
            info!(command = %command, dir = %dir.display(), "running generator");
            let _guard = CwdGuard::enter(dir)?;
            run_shell(&command, Some("cmake"))?;
        }
        Ok(())
    }

    /// The source directory in the spelling the generator expects; cygwin
    /// cmake is a native Windows binary and needs a DOS path
    fn generator_source_dir(&self, src_dir: &str) -> Result<String, CoreError> {
        if self.identity.os == Os::Cygwin {
            let rewritten =
                develop_platform::capture_stdout(&format!("cygpath -w {src_dir}"), Some("cygpath"))?;
            return Ok(rewritten);
        }
        Ok(src_dir.to_string())
    }

    /// Compile in every build directory (linux only; the other platforms
    /// build through their generated IDE projects).
    ///
    /// Build directories must already exist; the parallelism flag comes
    /// from the estimator unless the configuration carries an explicit
    /// count. Empty `targets` defaults to `all`.
    pub fn build(
        &self,
        estimator: &ParallelismEstimator,
        build_opts: &[String],
        targets: &[String],
    ) -> Result<(), CoreError> {
        if self.identity.os != Os::Linux {
            return Err(CoreError::BuildUnsupported {
                os: self.identity.os,
            });
        }

        let build_dirs = self.build_dirs();
        for dir in &build_dirs {
            if !dir.is_dir() {
                return Err(CoreError::MissingPrerequisite {
                    dir: dir.display().to_string(),
                });
            }
        }

        let jobs = estimator.estimate(self.config.jobs, self.config.distcc)?;
        let mut opts: Vec<String> = build_opts.to_vec();
        opts.push("-j".to_string());
        opts.push(jobs.to_string());

        let targets = if targets.is_empty() {
            "all".to_string()
        } else {
            targets.join(" ")
        };
        let tool = if self.config.generator == "Ninja" {
            "ninja"
        } else {
            "make"
        };

        for dir in &build_dirs {
            let command = format!(
                "{tool} -C '{}' {} {targets}",
                dir.display(),
                opts.join(" ")
            );
            info!(command = %command, "running build tool");
            run_shell(&command, None)?;
        }
        Ok(())
    }

    /// Delete the build directories; returns how many existed and were
    /// removed (zero is informational, not an error)
    pub fn clean(&self) -> Result<usize, CoreError> {
        dirs::clean(&self.build_dirs())
    }
}
