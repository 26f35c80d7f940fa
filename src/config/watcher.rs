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

//! File system watcher for live config file monitoring
//!
//! Uses OS-level file watching (Linux inotify) via the notify crate.
//!
//! The parent directory is watched rather than the file itself: atomic
//! writes replace the file by rename, which would silently end a watch on
//! the old inode.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    ffi::OsString,
    path::Path,
    sync::mpsc::{channel, Receiver},
};

use crate::config::ConfigError;

/// Watches the config file for modifications
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl ConfigWatcher {
    pub fn new(config_path: &Path) -> Result<Self, ConfigError> {
        let file_name = config_path
            .file_name()
            .ok_or_else(|| ConfigError::InvalidPath(config_path.to_path_buf()))?
            .to_os_string();
        let directory = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| ConfigError::Watch(e.to_string()))?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::Watch(format!("{}: {}", directory.display(), e)))?;

        tracing::debug!(directory = %directory.display(), "watching for config changes");

        Ok(ConfigWatcher {
            _watcher: watcher,
            rx,
            file_name,
        })
    }

    /// Checks for config file events (non-blocking)
    pub fn check_for_changes(&self) -> bool {
        let mut changed = false;
        while let Ok(event_result) = self.rx.try_recv() {
            if let Ok(event) = event_result {
                changed |= self.is_relevant(&event);
            }
        }
        changed
    }

    /// Blocks until the config file is created, modified or removed
    pub fn wait_for_change(&self) -> Result<(), ConfigError> {
        loop {
            match self.rx.recv() {
                Ok(Ok(event)) if self.is_relevant(&event) => return Ok(()),
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => tracing::warn!(error = %e, "file watcher reported an error"),
                Err(_) => return Err(ConfigError::Watch("watcher channel closed".to_string())),
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        let touches_file = event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(self.file_name.as_os_str()));

        touches_file
            && matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            )
    }
}
