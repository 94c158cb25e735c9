//! Build configuration types
//!
//! The original driver kept these as mutable class-level defaults; here they
//! are one explicit struct handed to the strategy, so nothing is shared
//! between instances behind the caller's back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use develop_platform::Os;

/// Optimization/debug-symbol profile of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
}

impl BuildType {
    /// Canonical CamelCase name
    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
        }
    }

    /// Upper-cased form used for `-DCMAKE_BUILD_TYPE`
    pub fn cmake_label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Lower-cased form embedded in linux build directory names
    pub fn dir_label(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// The accepted names, for error messages
    pub const fn supported_names() -> &'static str {
        "Debug, Release, RelWithDebInfo"
    }
}

impl FromStr for BuildType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            _ => Err(CoreError::UnknownBuildType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Degree of build parallelism requested by the caller.
///
/// `Auto` means "estimate from the machine and the distcc cluster"; it is
/// decided once during option parsing, never inferred mid-build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jobs {
    Auto,
    Count(u32),
}

impl Default for Jobs {
    fn default() -> Self {
        Jobs::Auto
    }
}

impl From<Option<u32>> for Jobs {
    fn from(n: Option<u32>) -> Self {
        match n {
            Some(n) => Jobs::Count(n),
            None => Jobs::Auto,
        }
    }
}

/// Everything the caller can tune before running an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub build_type: BuildType,
    /// Build against system libraries instead of the prebuilt ones
    pub systemlibs: bool,
    /// Generator identifier; on the Windows family this is a key into the
    /// toolset table (`vs2022`, `vs2022-clang`), elsewhere the literal name
    /// passed to `-G`
    pub generator: String,
    /// Root project name override passed to the generator
    pub project_name: String,
    /// Whether distributed compilation is taken into account
    pub distcc: bool,
    pub jobs: Jobs,
}

impl BuildConfig {
    /// Defaults for a given OS; only the generator differs per platform
    pub fn for_os(os: Os) -> Self {
        Self {
            build_type: BuildType::Release,
            systemlibs: false,
            generator: Self::default_generator(os).to_string(),
            project_name: "CoolVLViewer".to_string(),
            distcc: true,
            jobs: Jobs::Auto,
        }
    }

    /// The generator used when the caller does not pick one
    pub fn default_generator(os: Os) -> &'static str {
        match os {
            Os::Unix | Os::Linux => "Unix Makefiles",
            Os::Darwin => "Xcode",
            Os::Windows | Os::Cygwin => "vs2022",
        }
    }

    /// `ON`/`OFF` form of the systemlibs flag for the generator
    pub fn systemlibs_label(&self) -> &'static str {
        if self.systemlibs { "ON" } else { "OFF" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_type_parse_is_case_insensitive() {
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!("DEBUG".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!(
            "RelWithDebInfo".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
    }

    #[test]
    fn build_type_parse_rejects_unknown() {
        let err = "fast".parse::<BuildType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown build type 'fast'"));
        assert!(msg.contains("RelWithDebInfo"));
    }

    #[test]
    fn build_type_labels() {
        assert_eq!(BuildType::RelWithDebInfo.cmake_label(), "RELWITHDEBINFO");
        assert_eq!(BuildType::RelWithDebInfo.dir_label(), "relwithdebinfo");
    }

    #[test]
    fn jobs_from_option() {
        assert_eq!(Jobs::from(Some(12)), Jobs::Count(12));
        assert_eq!(Jobs::from(None), Jobs::Auto);
    }

    #[test]
    fn defaults_per_os() {
        assert_eq!(BuildConfig::for_os(Os::Linux).generator, "Unix Makefiles");
        assert_eq!(BuildConfig::for_os(Os::Darwin).generator, "Xcode");
        assert_eq!(BuildConfig::for_os(Os::Cygwin).generator, "vs2022");

        let config = BuildConfig::for_os(Os::Linux);
        assert_eq!(config.build_type, BuildType::Release);
        assert!(config.distcc);
        assert!(!config.systemlibs);
        assert_eq!(config.systemlibs_label(), "OFF");
    }
}
