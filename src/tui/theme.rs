//! TUI color semantics and styles.
//!
//! Eight semantic colors, each overridable from the `[theme]` table of the
//! config file. Values use ratatui's color syntax: a name (`"cyan"`,
//! `"lightblue"`), a hex triplet (`"#7d56f4"`) or an ANSI index (`"212"`).
//! An unparsable value falls back to the default for that slot.
//!
//! Color semantics:
//! - Primary: titles, key hints
//! - Secondary: subtitles, field labels, help line
//! - Highlight: list cursor, focused field
//! - Error / Success / Warning / Info: status line by severity

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::types::ThemeConfig;

use super::status::Severity;

// ============================================================================
// FIXED STYLES
// ============================================================================

/// Placeholder text in an empty field.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Emphasis that does not depend on the palette.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// PALETTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub highlight: Color,
    pub text: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: Color::Rgb(0x7d, 0x56, 0xf4),
            secondary: Color::Cyan,
            highlight: Color::Rgb(0xee, 0x6f, 0xf8),
            text: Color::Reset,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            info: Color::Blue,
        }
    }
}

impl Theme {
    /// Defaults with every valid override from `config` applied.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let base = Theme::default();
        Theme {
            primary: pick("primary", config.primary.as_deref(), base.primary),
            secondary: pick("secondary", config.secondary.as_deref(), base.secondary),
            highlight: pick("highlight", config.highlight.as_deref(), base.highlight),
            text: pick("text", config.text.as_deref(), base.text),
            error: pick("error", config.error.as_deref(), base.error),
            success: pick("success", config.success.as_deref(), base.success),
            warning: pick("warning", config.warning.as_deref(), base.warning),
            info: pick("info", config.info.as_deref(), base.info),
        }
    }

    pub fn title(&self) -> Style {
        Style::new().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::new().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::new().fg(self.text)
    }

    /// The `→` marker and the row it points at.
    pub fn cursor(&self) -> Style {
        Style::new().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::new().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    /// Label and value of the field that has focus.
    pub fn active_field(&self) -> Style {
        Style::new().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn help(&self) -> Style {
        Style::new().fg(self.secondary).add_modifier(Modifier::ITALIC)
    }

    pub fn key_hint(&self) -> Style {
        Style::new().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn error_text(&self) -> Style {
        Style::new().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn dialog_border(&self) -> Style {
        Style::new().fg(self.warning)
    }

    pub fn status(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.error_text(),
            Severity::Success => Style::new().fg(self.success),
            Severity::Warning => Style::new().fg(self.warning),
            Severity::Info => Style::new().fg(self.info),
        }
    }
}

fn pick(slot: &str, value: Option<&str>, fallback: Color) -> Color {
    let Some(value) = value else {
        return fallback;
    };
    match Color::from_str(value.trim()) {
        Ok(color) => color,
        Err(_) => {
            log::warn!("ignoring invalid {} color {:?}", slot, value);
            fallback
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
