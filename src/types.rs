//! Domain types for akumi.
//!
//! A [`TargetRecord`] is one SSH endpoint. A [`Config`] is the whole
//! persisted document: the ordered target list plus optional theme
//! overrides. The list is always saved and loaded as a unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Port assumed when a target does not name one.
pub const DEFAULT_PORT: u16 = 22;

// ============================================================================
// TARGETS
// ============================================================================

/// A named remote endpoint reachable with `ssh`.
///
/// On disk the port is omitted when it equals [`DEFAULT_PORT`] and restored
/// on load, so `port` always holds a concrete value in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Optional display name. Not unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub user: String,
    pub host: String,
    #[serde(default = "default_port", skip_serializing_if = "is_default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn is_default_port(port: &u16) -> bool {
    *port == DEFAULT_PORT
}

impl TargetRecord {
    /// Create a target without a nickname.
    pub fn new(user: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        TargetRecord {
            nickname: None,
            user: user.into(),
            host: host.into(),
            port,
        }
    }

    /// Builder-style nickname setter. Empty names are stored as `None`.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        let nickname = nickname.into();
        self.nickname = if nickname.is_empty() { None } else { Some(nickname) };
        self
    }

    /// `user@host`, the first argument handed to `ssh`.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Arguments for the `ssh` command. `-p` only appears for non-default
    /// ports; `--` keeps a destination starting with `-` from being read
    /// as an option.
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if self.port != DEFAULT_PORT {
            args.push("-p".to_string());
            args.push(self.port.to_string());
        }
        args.push("--".to_string());
        args.push(self.destination());
        args
    }

    /// Bring a freshly deserialized record back to its in-memory invariants.
    ///
    /// Port 0 is how older files spelled "default"; empty nicknames
    /// mean no nickname.
    pub(crate) fn normalize(&mut self) {
        if self.port == 0 {
            self.port = DEFAULT_PORT;
        }
        if self.nickname.as_deref().is_some_and(str::is_empty) {
            self.nickname = None;
        }
    }
}

impl fmt::Display for TargetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(nickname) = &self.nickname {
            write!(f, "[{}] ", nickname)?;
        }
        write!(f, "{}", self.destination())?;
        if self.port != DEFAULT_PORT {
            write!(f, ":{}", self.port)?;
        }
        Ok(())
    }
}

// ============================================================================
// PERSISTED DOCUMENT
// ============================================================================

/// Color overrides read from the `[theme]` table.
///
/// Each value is a color name understood by ratatui (`"cyan"`,
/// `"lightblue"`) or a `#rrggbb` hex string. Unset keys keep the
/// built-in palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ThemeConfig {
    pub fn is_empty(&self) -> bool {
        *self == ThemeConfig::default()
    }
}

/// Everything akumi keeps on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: Vec<TargetRecord>,
    #[serde(default, skip_serializing_if = "ThemeConfig::is_empty")]
    pub theme: ThemeConfig,
}

impl Config {
    pub fn with_targets(targets: Vec<TargetRecord>) -> Self {
        Config {
            targets,
            theme: ThemeConfig::default(),
        }
    }

    pub(crate) fn normalize(&mut self) {
        for target in &mut self.targets {
            target.normalize();
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Output format for the `list` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One display line per target.
    #[default]
    Human,
    /// Machine-readable JSON array.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_default_port() {
        let target = TargetRecord::new("alice", "example.com", 22);
        assert_eq!(target.to_string(), "alice@example.com");
    }

    #[test]
    fn display_shows_custom_port_and_nickname() {
        let target = TargetRecord::new("bob", "h1", 2200).with_nickname("db");
        assert_eq!(target.to_string(), "[db] bob@h1:2200");
    }

    #[test]
    fn ssh_args_skip_port_flag_for_default() {
        let target = TargetRecord::new("alice", "example.com", 22);
        assert_eq!(target.ssh_args(), vec!["--", "alice@example.com"]);
    }

    #[test]
    fn ssh_args_include_port_flag_otherwise() {
        let target = TargetRecord::new("carol", "h2", 2222);
        assert_eq!(
            target.ssh_args(),
            vec!["-p", "2222", "--", "carol@h2"]
        );
    }

    #[test]
    fn ssh_args_never_let_destination_read_as_option() {
        let target = TargetRecord::new("-oProxyCommand=touch /tmp/x", "h", 2200);
        let args = target.ssh_args();
        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(separator, args.len() - 2);
        assert_eq!(args.last().unwrap(), "-oProxyCommand=touch /tmp/x@h");
        assert!(args[..separator].iter().all(|a| a == "-p" || a == "2200"));
    }

    #[test]
    fn empty_nickname_becomes_none() {
        let target = TargetRecord::new("a", "b", 22).with_nickname("");
        assert!(target.nickname.is_none());
    }

    #[test]
    fn normalize_restores_zero_port_and_blank_nickname() {
        let mut target = TargetRecord {
            nickname: Some(String::new()),
            user: "u".into(),
            host: "h".into(),
            port: 0,
        };
        target.normalize();
        assert_eq!(target.port, DEFAULT_PORT);
        assert!(target.nickname.is_none());
    }

    #[test]
    fn default_theme_is_empty() {
        assert!(ThemeConfig::default().is_empty());
        let theme = ThemeConfig {
            primary: Some("#ff0000".into()),
            ..Default::default()
        };
        assert!(!theme.is_empty());
    }
}
