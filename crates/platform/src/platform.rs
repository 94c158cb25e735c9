//! Host OS and architecture detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system the build driver runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Any Unix we do not know better about
    Unix,
    Linux,
    Darwin,
    Windows,
    Cygwin,
}

impl Os {
    /// Detect the current operating system at compile time
    #[cfg(target_os = "linux")]
    pub const fn current() -> Self {
        Os::Linux
    }

    #[cfg(target_os = "macos")]
    pub const fn current() -> Self {
        Os::Darwin
    }

    #[cfg(target_os = "windows")]
    pub const fn current() -> Self {
        Os::Windows
    }

    #[cfg(target_os = "cygwin")]
    pub const fn current() -> Self {
        Os::Cygwin
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows",
        target_os = "cygwin"
    )))]
    pub const fn current() -> Self {
        Os::Unix
    }

    /// Returns the OS name as embedded in build directory names.
    ///
    /// Both Windows flavours report `win64`, matching the name the
    /// generated projects have always used.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Unix => "unix",
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows | Os::Cygwin => "win64",
        }
    }

    /// True for the Windows family (native or Cygwin)
    pub const fn is_windows_family(&self) -> bool {
        matches!(self, Os::Windows | Os::Cygwin)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
    Arm,
}

impl Arch {
    /// Detect the current architecture at compile time
    #[cfg(target_arch = "x86_64")]
    pub const fn current() -> Self {
        Arch::X86_64
    }

    #[cfg(target_arch = "aarch64")]
    pub const fn current() -> Self {
        Arch::Aarch64
    }

    #[cfg(target_arch = "arm")]
    pub const fn current() -> Self {
        Arch::Arm
    }

    /// Returns the architecture name as embedded in build directory names
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Arm => "arm",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OS plus optional CPU architecture, fixed once per strategy instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformIdentity {
    pub os: Os,
    pub arch: Option<Arch>,
}

impl PlatformIdentity {
    /// Create an identity with an explicit architecture
    pub const fn new(os: Os, arch: Option<Arch>) -> Self {
        Self { os, arch }
    }

    /// Detect the identity of the running host at compile time
    pub const fn current() -> Self {
        Self {
            os: Os::current(),
            arch: Some(Arch::current()),
        }
    }

    /// Identity for a given OS, with the host architecture filled in.
    ///
    /// The Windows family always reports `x86_64`: the only supported
    /// generators there target 64-bit x86.
    pub const fn for_os(os: Os) -> Self {
        let arch = if os.is_windows_family() {
            Some(Arch::X86_64)
        } else {
            Some(Arch::current())
        };
        Self { os, arch }
    }

    /// Returns `<os>` or `<os>-<arch>` (e.g. `linux-x86_64`)
    pub fn label(&self) -> String {
        match self.arch {
            Some(arch) => format!("{}-{}", self.os, arch),
            None => self.os.to_string(),
        }
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_identity_has_arch() {
        let identity = PlatformIdentity::current();
        assert!(identity.arch.is_some());
        assert!(identity.label().contains('-'));
    }

    #[test]
    fn test_label_format() {
        let identity = PlatformIdentity::new(Os::Linux, Some(Arch::X86_64));
        assert_eq!(identity.label(), "linux-x86_64");

        let identity = PlatformIdentity::new(Os::Unix, None);
        assert_eq!(identity.label(), "unix");
    }

    #[test]
    fn test_windows_family_reports_win64() {
        assert_eq!(Os::Windows.as_str(), "win64");
        assert_eq!(Os::Cygwin.as_str(), "win64");
        assert!(Os::Cygwin.is_windows_family());
        assert!(!Os::Linux.is_windows_family());
    }

    #[test]
    fn test_for_os_windows_arch() {
        let identity = PlatformIdentity::for_os(Os::Windows);
        assert_eq!(identity.arch, Some(Arch::X86_64));
    }
}
