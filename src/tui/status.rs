//! Ephemeral status line.
//!
//! Holds at most one message. Setting replaces whatever is live. Each
//! set bumps a generation counter; the event loop schedules a timeout
//! carrying that generation, and [`StatusChannel::expire`] ignores
//! timeouts that belong to a message that has since been replaced.

use std::time::Duration;

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Severity, mapped to a color by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct StatusChannel {
    current: Option<StatusMessage>,
    generation: u64,
}

impl StatusChannel {
    /// Replace the live message. Returns the generation to expire it with.
    pub fn set(&mut self, text: impl Into<String>, severity: Severity) -> u64 {
        self.generation += 1;
        self.current = Some(StatusMessage {
            text: text.into(),
            severity,
        });
        self.generation
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.set(text, Severity::Info)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.set(text, Severity::Error)
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.set(text, Severity::Success)
    }

    /// Clear the message if it is still the one stamped `generation`.
    pub fn expire(&mut self, generation: u64) {
        if self.generation == generation {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
