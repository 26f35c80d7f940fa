//! Configuration file management with atomic writes and backup support.
//!
//! This module is the config engine: it owns the libinput-gestures config
//! file as the single source of truth and exposes every operation the front
//! end needs. Key features:
//!
//! - **No caching**: every operation reads the file fresh
//! - **Atomic writes**: Uses temp-file-then-rename to prevent corruption
//! - **Explicit repair**: malformed lines are only removed on request
//! - **Default install backup**: the previous config is copied to `<file>.old`
//!
//! The engine is not safe for concurrent writers: two processes editing the
//! same file at once will silently lose one side's changes.
//!
//! # Example
//!
//! ```no_run
//! use gesture_config_manager::config::ConfigManager;
//!
//! let manager = ConfigManager::new("/home/user/.config/libinput-gestures.conf".into())?;
//!
//! manager.upsert(
//!     "gesture swipe up",
//!     3,
//!     "gesture swipe up 3 xdotool key super+Up",
//! )?;
//!
//! for binding in manager.parse_for_display()? {
//!     println!("{} ({} fingers): {}", binding.label(), binding.finger_count, binding.payload());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod transaction;
pub mod watcher;

pub use error::ConfigError;
pub use transaction::ConfigTransaction;
pub use watcher::ConfigWatcher;

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::core::{
    validator::{validate_delete_key, validate_upsert},
    ConfigDocument, GestureBinding, RepairReport,
};

/// Where libinput-gestures looks for the per-user config
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/libinput-gestures.conf";

/// Suffix of the single-generation backup written by `install_defaults`
pub const BACKUP_SUFFIX: &str = ".old";

/// Manages the libinput-gestures configuration file.
///
/// Holds nothing but the path. Every method performs a complete
/// read-transform-write cycle, so two calls never share stale state.
#[derive(Clone, Debug)]
pub struct ConfigManager {
    /// Path to the libinput-gestures configuration file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager for the given config file.
    ///
    /// The file does not have to exist yet; an absent file reads as an empty
    /// config. If the config is a symlink, a warning is logged but the
    /// operation continues.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPath` if the path has no file name.
    pub fn new(config_path: PathBuf) -> Result<Self, ConfigError> {
        if config_path.file_name().is_none() {
            return Err(ConfigError::InvalidPath(config_path));
        }

        // Warn if config is a symlink (but allow it)
        if config_path.read_link().is_ok() {
            tracing::warn!(
                path = %config_path.display(),
                "config file is a symlink; writes replace the link with a regular file"
            );
        }

        Ok(Self { config_path })
    }

    /// ConfigManager for `~/.config/libinput-gestures.conf`
    pub fn with_default_path() -> Result<Self, ConfigError> {
        Self::new(expand_path(DEFAULT_CONFIG_PATH)?)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Sibling path holding the backup, e.g. `libinput-gestures.conf.old`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(OsString::new);
        name.push(BACKUP_SUFFIX);
        self.config_path.with_file_name(name)
    }

    /// Reads the configuration file as a document.
    ///
    /// An absent file is an empty document, not an error: it just means no
    /// gestures have been configured yet.
    pub fn read_document(&self) -> Result<ConfigDocument, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(ConfigDocument::from_text(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_path.display(), "config absent, treating as empty");
                Ok(ConfigDocument::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the raw lines of the config file, terminators included.
    pub fn read(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.read_document()?.into_lines())
    }

    /// Overwrites the config file with the exact concatenation of `lines`.
    pub fn write<S: AsRef<str>>(&self, lines: &[S]) -> Result<(), ConfigError> {
        let content: String = lines.iter().map(AsRef::as_ref).collect();
        transaction::write_atomic(&self.config_path, &content)
    }

    /// Collapses every run of spaces and tabs into a single space.
    ///
    /// Safe on any file, parseable or not, and idempotent.
    pub fn normalize_whitespace(&self) -> Result<(), ConfigError> {
        let mut tx = ConfigTransaction::begin(self)?;
        let normalized = tx.document().normalized();
        tx.replace(normalized);
        tracing::debug!(changed = tx.is_modified(), "normalized whitespace");
        tx.commit()
    }

    /// Removes every line that fails the config grammar.
    ///
    /// This is destructive: dropped lines are gone once the file is
    /// rewritten. Call it only after the user agreed to repair the file,
    /// typically after `parse_for_display` failed.
    ///
    /// Returns what was kept and what was dropped.
    pub fn validate_and_repair(&self) -> Result<RepairReport, ConfigError> {
        let mut tx = ConfigTransaction::begin(self)?;
        let (repaired, report) = tx.document().repair();

        for dropped in &report.dropped {
            tracing::warn!(
                line = dropped.line_number,
                reason = %dropped.reason,
                text = %dropped.text,
                "dropping malformed config line"
            );
        }

        tx.replace(repaired);
        tx.commit()?;

        tracing::info!(kept = report.kept, dropped = report.dropped.len(), "config repaired");
        Ok(report)
    }

    /// Decodes every `gesture` line, in file order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if any gesture line cannot be decoded.
    /// The caller may then offer `validate_and_repair` and retry.
    pub fn parse_for_display(&self) -> Result<Vec<GestureBinding>, ConfigError> {
        let bindings = self.read_document()?.bindings()?;
        tracing::debug!(count = bindings.len(), "decoded gesture bindings");
        Ok(bindings)
    }

    /// Replaces every binding keyed by `gesture_action` + `finger_count`
    /// with `line`, appended at the end of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRequest` for an empty action, zero
    /// fingers, an empty line, or a line filed under a different key.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gesture_config_manager::config::ConfigManager;
    /// # let manager = ConfigManager::new("libinput-gestures.conf".into())?;
    /// manager.upsert("gesture pinch in", 2, "gesture pinch in 2 xdotool key ctrl+minus")?;
    /// # Ok::<(), gesture_config_manager::config::ConfigError>(())
    /// ```
    pub fn upsert(&self, gesture_action: &str, finger_count: u32, line: &str) -> Result<(), ConfigError> {
        validate_upsert(gesture_action, finger_count, line)?;

        let key = format!("{} {}", gesture_action.trim(), finger_count);
        let mut tx = ConfigTransaction::begin(self)?;
        let replaced = tx.document_mut().remove_key(&key);
        tx.document_mut().push_line(line);

        tracing::info!(%key, replaced, "upserting gesture binding");
        tx.commit()
    }

    /// Removes every line keyed by `key` (usually a binding's canonical key).
    ///
    /// Returns how many lines were removed.
    pub fn delete(&self, key: &str) -> Result<usize, ConfigError> {
        validate_delete_key(key)?;

        let mut tx = ConfigTransaction::begin(self)?;
        let removed = tx.document_mut().remove_key(key);
        if removed == 0 {
            tracing::warn!(%key, "no config lines matched key");
        } else {
            tracing::info!(%key, removed, "deleted gesture binding");
        }

        tx.commit()?;
        Ok(removed)
    }

    /// Backs up the current config to `<file>.old`, then writes `defaults`.
    ///
    /// The backup is single-generation: any previous `.old` file is
    /// overwritten. An absent config backs up as an empty file.
    pub fn install_defaults(&self, defaults: &str) -> Result<String, ConfigError> {
        let backup_path = self.create_backup()?;
        tracing::info!(backup = %backup_path.display(), "backed up config before installing defaults");

        transaction::write_atomic(&self.config_path, defaults)?;
        Ok(defaults.to_string())
    }

    /// Replaces the config with the content of another file, then
    /// normalises whitespace and repairs it.
    ///
    /// The source is read before anything is written, so a missing source
    /// leaves the current config untouched.
    pub fn import(&self, source: &Path) -> Result<RepairReport, ConfigError> {
        let content = fs::read_to_string(source)?;
        tracing::info!(source = %source.display(), "importing config");

        transaction::write_atomic(&self.config_path, &content)?;
        self.normalize_whitespace()?;
        self.validate_and_repair()
    }

    /// Copies the current content to the backup path.
    fn create_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = self.read_document()?.to_text();
        let backup_path = self.backup_path();

        transaction::write_atomic(&backup_path, &content).map_err(|e| {
            ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e))
        })?;

        Ok(backup_path)
    }
}

/// Expands `~` and returns an owned path
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::tilde(path);
    let path = PathBuf::from(expanded.as_ref());
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath(path));
    }
    Ok(path)
}

/// Same as [`expand_path`] for a path that may not be valid UTF-8
pub fn expand_path_buf(path: &Path) -> Result<PathBuf, ConfigError> {
    let as_str = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
    expand_path(as_str)
}

#[cfg(test)]
mod tests;
