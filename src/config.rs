//! Persistent user configuration.
//!
//! The configuration is a small JSON object stored in a per-user,
//! platform-specific directory:
//!
//! - macOS: `~/Library/Application Support/bioflow/config.json`
//! - Windows: `%APPDATA%\bioflow\config.json` (or `~/.bioflow/config.json`)
//! - others: `$XDG_CONFIG_HOME/bioflow/config.json` (or `~/.config/bioflow/config.json`)
//!
//! Older releases kept `config.json` next to the executable. The first load
//! through a [`ConfigStore`] moves that file into the per-user directory when
//! no per-user file exists yet.
//!
//! Every I/O or parse failure is logged and absorbed: loading degrades to an
//! empty document and saving becomes a no-op.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Directory name used under the platform config root.
pub const APP_DIR_NAME: &str = "bioflow";
/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "config.json";

const LANGUAGE_KEY: &str = "language";

/// Host operating system family, as far as config placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Windows,
    /// Linux, BSDs and other Unix-like systems
    Other,
}

impl HostOs {
    /// The family of the running host.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Other
        }
    }
}

/// Resolves the configuration directory for a given host and environment.
///
/// `env_lookup` is consulted for `APPDATA` (Windows) or `XDG_CONFIG_HOME`
/// (other Unix-likes); empty values count as unset.
pub fn resolve_config_dir<F>(os: HostOs, env_lookup: F, home: &Path) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env_lookup(key).filter(|value| !value.is_empty());

    match os {
        HostOs::MacOs => home
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_NAME),
        HostOs::Windows => match non_empty("APPDATA") {
            Some(appdata) => PathBuf::from(appdata).join(APP_DIR_NAME),
            None => home.join(format!(".{APP_DIR_NAME}")),
        },
        HostOs::Other => match non_empty("XDG_CONFIG_HOME") {
            Some(xdg) => PathBuf::from(xdg).join(APP_DIR_NAME),
            None => home.join(".config").join(APP_DIR_NAME),
        },
    }
}

/// The configuration directory for the running process.
pub fn default_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    resolve_config_dir(HostOs::current(), |key| env::var(key).ok(), &home)
}

/// Where releases before the per-user directory kept their config.
pub fn legacy_config_path() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// A flat key-value configuration document.
///
/// Keys this crate does not know about are kept as-is so that newer
/// releases can share the same file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// The stored language code, if any. The code is not validated here.
    pub fn language(&self) -> Option<&str> {
        self.0.get(LANGUAGE_KEY).and_then(Value::as_str)
    }

    pub fn set_language(&mut self, code: &str) {
        self.insert(LANGUAGE_KEY, Value::String(code.to_string()));
    }
}

/// Loads and saves the [`ConfigDocument`].
#[derive(Debug)]
pub struct ConfigStore {
    dir: PathBuf,
    path: PathBuf,
    legacy_path: Option<PathBuf>,
    migration: OnceCell<()>,
}

impl ConfigStore {
    /// Store at the platform location, migrating from next to the executable.
    pub fn from_environment() -> Self {
        Self::with_paths(default_config_dir(), legacy_config_path())
    }

    /// Store in `dir`, with an optional legacy file to migrate from.
    pub fn with_paths(dir: impl Into<PathBuf>, legacy_path: Option<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(CONFIG_FILE_NAME);
        Self {
            dir,
            path,
            legacy_path,
            migration: OnceCell::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document from disk.
    ///
    /// The legacy migration runs before the first read. Every call re-reads
    /// the file; missing, unreadable or malformed files yield an empty
    /// document.
    pub fn load(&self) -> ConfigDocument {
        self.migration.get_or_init(|| self.migrate_legacy());

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return ConfigDocument::new(),
            Err(err) => {
                log::warn!("Cannot read config ({err}), using defaults.");
                return ConfigDocument::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!(
                    "{} is corrupted ({err}), resetting to defaults.",
                    self.path.display()
                );
                ConfigDocument::new()
            }
        }
    }

    /// Writes the whole document, creating the directory if needed.
    ///
    /// Failures are logged; the preference simply does not persist.
    pub fn save(&self, doc: &ConfigDocument) {
        if let Err(err) = self.write_document(doc) {
            log::warn!("Cannot save config ({err}), preference will not persist.");
        }
    }

    fn write_document(&self, doc: &ConfigDocument) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, text)
    }

    /// Moves the legacy file into place unless a current file already exists.
    fn migrate_legacy(&self) {
        let Some(legacy) = self.legacy_path.as_deref() else {
            return;
        };
        if !legacy.is_file() || self.path.exists() {
            return;
        }

        match move_file(legacy, &self.dir, &self.path) {
            Ok(()) => log::info!(
                "Migrated config from {} to {}",
                legacy.display(),
                self.path.display()
            ),
            Err(err) => log::warn!("Config migration failed: {err}"),
        }
    }
}

/// Renames `from` to `to`, falling back to copy-and-delete across devices.
fn move_file(from: &Path, dir: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)?;
    if let Err(err) = fs::remove_file(from) {
        // Leave only the legacy file behind
        let _ = fs::remove_file(to);
        return Err(err);
    }
    Ok(())
}
