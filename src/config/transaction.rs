// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read-modify-write cycles over the config file
//!
//! Every mutating engine operation is one [`ConfigTransaction`]: the file is
//! read fresh in `begin()`, transformed in memory, and rewritten in full by
//! `commit()`. Nothing is cached between transactions, so the file on disk is
//! always the state the next caller sees.

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::Path};

use crate::config::{ConfigError, ConfigManager};
use crate::core::ConfigDocument;

/// One read-transform-write cycle.
///
/// # Guarantees
///
/// - **Fresh**: `begin()` always reads the current file; an absent file
///   starts an empty document
/// - **Atomic**: `commit()` writes through a temp file and rename, so the
///   config is never left half-written
/// - **Not isolated**: edits made by another process between `begin()` and
///   `commit()` are overwritten (last writer wins)
///
/// Dropping a transaction without committing leaves the file untouched.
///
/// # Example
///
/// ```no_run
/// use gesture_config_manager::config::{ConfigManager, ConfigTransaction};
/// use std::path::PathBuf;
///
/// let manager = ConfigManager::new(PathBuf::from("libinput-gestures.conf"))?;
/// let mut tx = ConfigTransaction::begin(&manager)?;
/// tx.document_mut().push_line("swipe_threshold 0");
/// tx.commit()?;
/// # Ok::<(), gesture_config_manager::config::ConfigError>(())
/// ```
pub struct ConfigTransaction<'a> {
    manager: &'a ConfigManager,
    original: ConfigDocument,
    document: ConfigDocument,
}

impl<'a> ConfigTransaction<'a> {
    /// Begins a transaction by reading the config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file exists but cannot be read.
    pub fn begin(manager: &'a ConfigManager) -> Result<Self, ConfigError> {
        let original = manager.read_document()?;

        Ok(Self {
            manager,
            document: original.clone(),
            original,
        })
    }

    /// Document as read by `begin()`
    pub fn original(&self) -> &ConfigDocument {
        &self.original
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ConfigDocument {
        &mut self.document
    }

    /// Replaces the whole working document
    pub fn replace(&mut self, document: ConfigDocument) {
        self.document = document;
    }

    pub fn is_modified(&self) -> bool {
        self.document != self.original
    }

    /// Commits the transaction by atomically rewriting the config file.
    ///
    /// The file is rewritten even when the document is unchanged, matching
    /// the read-transform-write contract of every engine operation.
    ///
    /// This method consumes the transaction, preventing accidental double-commits.
    pub fn commit(self) -> Result<(), ConfigError> {
        tracing::debug!(
            path = %self.manager.config_path().display(),
            lines = self.document.len(),
            modified = self.is_modified(),
            "committing config"
        );
        write_atomic(self.manager.config_path(), &self.document.to_text())
    }
}

/// Writes `content` to `path` through a temp file and rename.
///
/// Creates the parent directory first if it is missing (a fresh
/// `~/.config` on a new account).
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // Open file for atomic writing
    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e))
    })?;

    // Write content
    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    // Commit atomically
    file.commit().map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e))
    })?;

    Ok(())
}
