//! akumi: a terminal manager for SSH connection targets.

pub mod error;
pub mod launcher;
pub mod logging;
pub mod report;
pub mod store;
pub mod tui;
pub mod types;
