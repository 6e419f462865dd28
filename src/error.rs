//! Error types.
//!
//! Each collaborator has its own error enum so callers can decide
//! locally what is fatal. Only a failed load ends the session; everything
//! else is folded into a status message by the TUI.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure reading or writing the config file.
///
/// Returned from `load` this is the session-fatal load error; returned
/// from `save` it is reported and the in-memory list is kept.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// User-correctable problem with the form contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username and host cannot be empty")]
    MissingUserOrHost,

    #[error("Port must be a valid number between 1-65535 (got {0:?})")]
    InvalidPort(String),
}

/// Cursor or edit index outside the list. Unreachable while the list
/// invariants hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for {len} targets")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// The external `ssh` command failed to start or exited unsuccessfully.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("ssh exited with {0}")]
    Exited(ExitStatus),
}

/// Top-level error returned from the TUI entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Load(#[source] StoreError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
