//! File logging.
//!
//! The terminal belongs to the TUI while it runs, so log records go to a
//! file instead of stderr. Everything else in the crate logs through the
//! `log` facade.

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;

/// Returns the default log file path.
///
/// On Linux: ~/.cache/akumi/akumi.log
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("akumi").join("akumi.log"))
}

/// Level used for the `-v` flag.
pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger, appending to `path`.
pub fn init(path: &Path, verbose: bool) -> Result<(), fern::InitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_filter(verbose))
        .chain(fern::log_file(path)?)
        .apply()?;

    Ok(())
}
