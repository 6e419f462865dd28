//! Hand the terminal to an external `ssh` process.
//!
//! The launcher blocks until the child exits. The caller is responsible
//! for releasing the terminal before calling [`ProcessLauncher::connect`]
//! and reclaiming it afterward.

use std::process::Command;

use crate::error::LaunchError;
use crate::types::TargetRecord;

/// Runs a connection to a target in the foreground.
pub trait ProcessLauncher {
    fn connect(&mut self, target: &TargetRecord) -> Result<(), LaunchError>;
}

/// Launches the system `ssh` client with inherited stdio.
#[derive(Debug, Clone)]
pub struct SshLauncher {
    program: String,
}

impl SshLauncher {
    pub fn new() -> Self {
        SshLauncher {
            program: "ssh".to_string(),
        }
    }

    /// Use a different client binary (e.g. `mosh`-compatible wrappers).
    pub fn with_program(program: impl Into<String>) -> Self {
        SshLauncher {
            program: program.into(),
        }
    }

    /// The full command, for logging.
    pub fn command_line(&self, target: &TargetRecord) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(target.ssh_args());
        parts.join(" ")
    }
}

impl Default for SshLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for SshLauncher {
    fn connect(&mut self, target: &TargetRecord) -> Result<(), LaunchError> {
        log::info!("running {}", self.command_line(target));

        let status = Command::new(&self.program)
            .args(target.ssh_args())
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Exited(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_includes_port_only_when_needed() {
        let launcher = SshLauncher::new();
        assert_eq!(
            launcher.command_line(&TargetRecord::new("alice", "example.com", 22)),
            "ssh -- alice@example.com"
        );
        assert_eq!(
            launcher.command_line(&TargetRecord::new("bob", "h1", 2200)),
            "ssh -p 2200 -- bob@h1"
        );
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let mut launcher = SshLauncher::with_program("akumi-test-no-such-binary");
        let err = launcher
            .connect(&TargetRecord::new("a", "b", 22))
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let mut launcher = SshLauncher::with_program("false");
        let err = launcher
            .connect(&TargetRecord::new("a", "b", 22))
            .unwrap_err();
        assert!(matches!(err, LaunchError::Exited(_)));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_ok() {
        let mut launcher = SshLauncher::with_program("true");
        assert!(launcher.connect(&TargetRecord::new("a", "b", 22)).is_ok());
    }
}
