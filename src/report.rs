//! Target listing for the `list` subcommand.
//!
//! Pure functions: (targets, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::types::{OutputFormat, TargetRecord};

/// Format the stored targets for output.
pub fn format_targets(targets: &[TargetRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(targets),
        OutputFormat::Json => format_json(targets),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(targets: &[TargetRecord]) -> String {
    if targets.is_empty() {
        return "No SSH connections configured yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, target) in targets.iter().enumerate() {
        out.push_str(&format!("{:>3}  {}\n", i + 1, target));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

/// JSON row. Unlike the config file, the port is always present.
#[derive(Serialize)]
struct TargetEntry<'a> {
    nickname: Option<&'a str>,
    user: &'a str,
    host: &'a str,
    port: u16,
    destination: String,
}

fn format_json(targets: &[TargetRecord]) -> String {
    let entries: Vec<TargetEntry> = targets
        .iter()
        .map(|t| TargetEntry {
            nickname: t.nickname.as_deref(),
            user: &t.user,
            host: &t.host,
            port: t.port,
            destination: t.destination(),
        })
        .collect();

    // Plain strings and integers cannot fail to serialize
    let mut out = serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================
