//! Blocking shell command execution with structured failure classification

use std::fmt;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::PlatformError;

/// Why an external command did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Non-zero exit code other than 127
    NonZeroExit(i32),
    /// Terminated by a signal (Unix only)
    Signaled(i32),
    /// Exit code 127: not on the search path or not executable
    NotFound,
    /// Neither a clean exit nor a recognized signal
    Unknown,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonZeroExit(code) => write!(f, "exited with status {}", code),
            FailureReason::Signaled(sig) => write!(f, "was killed by signal {}", sig),
            FailureReason::NotFound => write!(f, "was not found"),
            FailureReason::Unknown => write!(f, "died unexpectedly"),
        }
    }
}

/// Outcome of one external command, never partially filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub success: bool,
    pub failure: Option<FailureReason>,
}

impl ProcessOutcome {
    /// Classify an OS-level exit status.
    ///
    /// Exit code 127 is what shells report for a missing program, so it is
    /// mapped to [`FailureReason::NotFound`] rather than a plain exit code.
    pub fn classify(status: ExitStatus) -> Self {
        if status.success() {
            return Self {
                success: true,
                failure: None,
            };
        }
        let reason = match status.code() {
            Some(127) => FailureReason::NotFound,
            Some(code) => FailureReason::NonZeroExit(code),
            None => signal_of(status).map_or(FailureReason::Unknown, FailureReason::Signaled),
        };
        Self {
            success: false,
            failure: Some(reason),
        }
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}

/// The platform shell and the flag that makes it run one command string
fn shell_invocation() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Derive the display name of a command: its first whitespace token
fn default_display_name(command: &str) -> String {
    command
        .split_whitespace()
        .next()
        .unwrap_or(command)
        .to_string()
}

/// Run a shell command, blocking until completion, stdio inherited.
///
/// A failed command is always fatal to the caller's operation: the outcome
/// is converted into [`PlatformError::CommandFailed`] naming the command by
/// `display_name` (default: its first whitespace token). No retries.
pub fn run_shell(command: &str, display_name: Option<&str>) -> Result<(), PlatformError> {
    let (shell, flag) = shell_invocation();
    debug!(command = %command, "spawning shell command");

    let status = Command::new(shell).arg(flag).arg(command).status()?;
    let outcome = ProcessOutcome::classify(status);
    match outcome.failure {
        None => Ok(()),
        Some(reason) => Err(PlatformError::CommandFailed {
            name: display_name
                .map(str::to_string)
                .unwrap_or_else(|| default_display_name(command)),
            reason,
        }),
    }
}

/// Run a shell command and capture its trimmed stdout (stderr inherited).
///
/// Used for small helper tools whose single-line output feeds into a later
/// command, e.g. `cygpath -w` path rewriting.
pub fn capture_stdout(command: &str, display_name: Option<&str>) -> Result<String, PlatformError> {
    let (shell, flag) = shell_invocation();
    debug!(command = %command, "capturing shell command output");

    let output = Command::new(shell).arg(flag).arg(command).output()?;
    let outcome = ProcessOutcome::classify(output.status);
    if let Some(reason) = outcome.failure {
        return Err(PlatformError::CommandFailed {
            name: display_name
                .map(str::to_string)
                .unwrap_or_else(|| default_display_name(command)),
            reason,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_is_first_token() {
        assert_eq!(default_display_name("cmake -G 'Unix Makefiles'"), "cmake");
        assert_eq!(default_display_name("make"), "make");
    }

    #[cfg(unix)]
    mod classification {
        use super::super::*;
        use std::os::unix::process::ExitStatusExt;

        // Raw wait statuses: exit codes live in the high byte, signals in
        // the low byte.
        fn status_for_exit(code: i32) -> ExitStatus {
            ExitStatus::from_raw(code << 8)
        }

        fn status_for_signal(sig: i32) -> ExitStatus {
            ExitStatus::from_raw(sig)
        }

        #[test]
        fn clean_exit_is_success() {
            let outcome = ProcessOutcome::classify(status_for_exit(0));
            assert!(outcome.success);
            assert_eq!(outcome.failure, None);
        }

        #[test]
        fn exit_127_is_not_found() {
            let outcome = ProcessOutcome::classify(status_for_exit(127));
            assert_eq!(outcome.failure, Some(FailureReason::NotFound));
        }

        #[test]
        fn nonzero_exit_keeps_code() {
            let outcome = ProcessOutcome::classify(status_for_exit(2));
            assert_eq!(outcome.failure, Some(FailureReason::NonZeroExit(2)));
        }

        #[test]
        fn signal_termination_keeps_signal() {
            let outcome = ProcessOutcome::classify(status_for_signal(9));
            assert_eq!(outcome.failure, Some(FailureReason::Signaled(9)));
        }
    }

    #[cfg(unix)]
    mod execution {
        use super::super::*;

        #[test]
        fn run_shell_success() {
            run_shell("true", None).unwrap();
        }

        #[test]
        fn run_shell_failure_names_command() {
            let err = run_shell("exit 3", Some("buildtool")).unwrap_err();
            assert_eq!(
                err.to_string(),
                "the command 'buildtool' exited with status 3"
            );
        }

        #[test]
        fn run_shell_missing_program_is_not_found() {
            let err = run_shell("definitely-not-a-real-tool-0x7f", None).unwrap_err();
            match err {
                PlatformError::CommandFailed { reason, .. } => {
                    assert_eq!(reason, FailureReason::NotFound);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn capture_stdout_trims() {
            let out = capture_stdout("echo hello", None).unwrap();
            assert_eq!(out, "hello");
        }
    }
}
