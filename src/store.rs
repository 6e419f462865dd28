//! Persistent storage for the target list.
//!
//! Structure:
//! - `ConfigStore`: the load/save contract the TUI programs against
//! - `FileStore`: TOML file implementation
//!
//! The whole document is the unit of persistence. There is no
//! per-record write; every save overwrites the file with the current list.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::types::Config;

/// Application directory name under the user config dir.
const APP_DIR: &str = "akumi";

/// Config filename within the application directory.
const CONFIG_FILENAME: &str = "config.toml";

/// Filename used by earlier YAML-based releases. Never read.
const LEGACY_CONFIG_FILENAME: &str = "config.yaml";

/// Load/save contract for the persisted target list.
pub trait ConfigStore {
    /// Read the stored document. A missing file is an empty config, not
    /// an error.
    fn load(&self) -> Result<Config, StoreError>;

    /// Replace the stored document with `config`.
    fn save(&mut self, config: &Config) -> Result<(), StoreError>;

    /// Where the document lives, for display.
    fn location(&self) -> String;

    /// A config file from an earlier release that is not being read.
    fn legacy_location(&self) -> Option<String> {
        None
    }
}

// ============================================================================
// PATHS
// ============================================================================

/// Returns the default config file path.
///
/// On Linux: ~/.config/akumi/config.toml
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
        .ok_or(StoreError::NoConfigDir)
}

// ============================================================================
// FILE STORE
// ============================================================================

/// TOML-backed store.
///
/// Saves go through a temp file in the destination directory followed by
/// a rename, so a failed write never truncates the previous file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Store at [`default_config_path`].
    pub fn at_default_location() -> Result<Self, StoreError> {
        default_config_path().map(FileStore::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `config.yaml` next to the TOML file, if one exists.
    pub fn legacy_config(&self) -> Option<PathBuf> {
        let path = self.path.with_file_name(LEGACY_CONFIG_FILENAME);
        path.is_file().then_some(path)
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<Config, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, starting empty", self.path.display());
                if let Some(legacy) = self.legacy_config() {
                    log::warn!(
                        "{} is from an earlier release and is not read; targets are now stored in {}",
                        legacy.display(),
                        self.path.display()
                    );
                }
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut config: Config = toml::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        config.normalize();

        log::info!(
            "loaded {} targets from {}",
            config.targets.len(),
            self.path.display()
        );
        Ok(config)
    }

    fn save(&mut self, config: &Config) -> Result<(), StoreError> {
        let contents = toml::to_string_pretty(config)?;
        write_atomically(&self.path, contents.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        log::info!(
            "saved {} targets to {}",
            config.targets.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn legacy_location(&self) -> Option<String> {
        self.legacy_config().map(|path| path.display().to_string())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Write `data` to a sibling temp file, then rename it over `path`.
fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_config_dir(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    restrict_permissions(file.path())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn create_config_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o750).create(dir)
}

#[cfg(not(unix))]
fn create_config_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o640))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TargetRecord, ThemeConfig};
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> FileStore {
        FileStore::new(temp.path().join("akumi").join("config.toml"))
    }

    fn sample_targets() -> Vec<TargetRecord> {
        vec![
            TargetRecord::new("bob", "h1", 22),
            TargetRecord::new("carol", "h2", 2200).with_nickname("db"),
        ]
    }

    #[test]
    fn test_default_config_path_is_reasonable() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("akumi/config.toml"));
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let config = store.load().unwrap();
        assert!(config.targets.is_empty());
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.save(&Config::with_targets(sample_targets())).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let config = Config::with_targets(sample_targets());

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.targets[0].port, 22);
    }

    #[test]
    fn test_default_port_is_omitted_on_disk() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store
            .save(&Config::with_targets(vec![TargetRecord::new("alice", "example.com", 22)]))
            .unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("alice"));
        assert!(!text.contains("port"));
        assert!(!text.contains("nickname"));
    }

    #[test]
    fn test_save_load_save_is_stable() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.save(&Config::with_targets(sample_targets())).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_omitted_port_and_zero_port_load_as_default() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "[[targets]]\nuser = \"a\"\nhost = \"h\"\n\n[[targets]]\nuser = \"b\"\nhost = \"k\"\nport = 0\n",
        )
        .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.targets.len(), 2);
        assert!(config.targets.iter().all(|t| t.port == 22));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "targets = \"not a list\"").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_theme_survives_target_saves() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let config = Config {
            targets: sample_targets(),
            theme: ThemeConfig {
                primary: Some("#7d56f4".into()),
                ..Default::default()
            },
        };

        store.save(&config).unwrap();
        let mut loaded = store.load().unwrap();
        loaded.targets.pop();
        store.save(&loaded).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.theme.primary.as_deref(), Some("#7d56f4"));
        assert_eq!(reloaded.targets.len(), 1);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.save(&Config::with_targets(sample_targets())).unwrap();
        store.save(&Config::default()).unwrap();

        let entries = fs::read_dir(store.path().parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_not_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.save(&Config::default()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    fn sorted_listing(dir: &Path) -> Vec<std::ffi::OsString> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_write_leaves_existing_files_untouched() {
        let temp = TempDir::new().unwrap();
        let mut good = store_in(&temp);
        good.save(&Config::with_targets(sample_targets())).unwrap();
        let before = fs::read_to_string(good.path()).unwrap();

        // Renaming a file over a non-empty directory fails for any user
        let dir = good.path().parent().unwrap().to_path_buf();
        let occupied = dir.join("occupied");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "x").unwrap();
        let listing_before = sorted_listing(&dir);

        let mut blocked = FileStore::new(occupied.clone());
        let err = blocked.save(&Config::default()).unwrap_err();

        match err {
            StoreError::Write { path, .. } => assert_eq!(path, occupied),
            other => panic!("expected write error, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(good.path()).unwrap(), before);
        assert_eq!(sorted_listing(&dir), listing_before);
        assert_eq!(fs::read_to_string(occupied.join("keep")).unwrap(), "x");
        assert_eq!(good.load().unwrap().targets, sample_targets());
    }

    #[test]
    fn test_legacy_yaml_is_reported_but_not_read() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert_eq!(store.legacy_config(), None);
        assert_eq!(store.legacy_location(), None);

        let dir = store.path().parent().unwrap().to_path_buf();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yaml"), "targets:\n  - user: a\n    host: h\n").unwrap();

        assert_eq!(store.legacy_config(), Some(dir.join("config.yaml")));
        assert!(store.legacy_location().unwrap().ends_with("config.yaml"));
        assert!(store.load().unwrap().targets.is_empty());
    }

    #[test]
    fn test_legacy_yaml_ignored_once_toml_exists() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.save(&Config::with_targets(sample_targets())).unwrap();
        fs::write(store.path().with_file_name("config.yaml"), "targets: []\n").unwrap();

        assert_eq!(store.load().unwrap().targets, sample_targets());
    }
}
