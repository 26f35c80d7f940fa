// Copyright 2025 bakri (tidynest@proton.me)
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

//! KDE Plasma desktop integration through qdbus
//!
//! Desktop actions in the config are KWin global shortcuts triggered with
//! `qdbus org.kde.kglobalaccel /component/kwin invokeShortcut "<name>"`.
//! This module finds the qdbus binary (its name differs between
//! distributions) and asks KWin which shortcut names exist. The
//! [`setup`] submodule controls the libinput-gestures service itself.
//!
//! # Safety Modes
//!
//! - **DryRun**: builds commands but never spawns a process (tests)
//! - **Live**: runs qdbus or libinput-gestures-setup
//!
//! # Example
//! ```
//! use gesture_config_manager::ipc::{ClientMode, QdbusClient};
//!
//! let client = QdbusClient::new("qdbus", ClientMode::DryRun);
//! assert!(client.shortcut_names().unwrap().is_empty());
//! ```

pub mod setup;

pub use setup::{ServiceCommand, ServiceStatus, SetupClient};

use std::{env, ffi::OsStr, path::Path, process::Command};

use crate::config::ConfigError;
use crate::core::actions;

/// Binary names tried in order when locating qdbus
pub const QDBUS_CANDIDATES: &[&str] = &["qdbus", "qdbus-qt5", "qdbus6"];

/// Client operation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientMode {
    /// Build commands only, never spawn a process
    DryRun,
    /// Run the external tool for real
    Live,
}

/// qdbus wrapper for KWin global shortcuts
#[derive(Clone, Debug)]
pub struct QdbusClient {
    binary: String,
    mode: ClientMode,
}

impl QdbusClient {
    pub fn new(binary: impl Into<String>, mode: ClientMode) -> Self {
        Self {
            binary: binary.into(),
            mode,
        }
    }

    /// Finds qdbus on `PATH` and returns a live client for it
    ///
    /// Returns `None` when no candidate is installed; desktop actions and
    /// the KDE defaults are unavailable in that case.
    pub fn locate() -> Option<Self> {
        let path_var = env::var_os("PATH")?;
        let binary = locate_in(&path_var)?;
        tracing::debug!(%binary, "found qdbus");
        Some(Self::new(binary, ClientMode::Live))
    }

    /// Name the client runs and writes into config lines
    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    /// Action text invoking the KWin shortcut `name`
    pub fn desktop_action(&self, name: &str) -> String {
        actions::desktop_action(&self.binary, name)
    }

    /// KDE Plasma defaults using this qdbus binary
    pub fn kde_defaults(&self) -> String {
        actions::kde_defaults(&self.binary)
    }

    /// Arguments of the query listing KWin shortcut names
    pub fn shortcut_names_args(&self) -> [&'static str; 3] {
        [
            "org.kde.kglobalaccel",
            "/component/kwin",
            "org.kde.kglobalaccel.Component.shortcutNames",
        ]
    }

    /// Lists the KWin global shortcut names, sorted
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Desktop` if qdbus cannot be started or exits
    /// with an error (for example when KWin is not running).
    pub fn shortcut_names(&self) -> Result<Vec<String>, ConfigError> {
        if self.mode == ClientMode::DryRun {
            tracing::debug!(
                binary = %self.binary,
                args = ?self.shortcut_names_args(),
                "dry run: not querying KWin"
            );
            return Ok(Vec::new());
        }

        let output = Command::new(&self.binary)
            .args(self.shortcut_names_args())
            .output()
            .map_err(|e| ConfigError::Desktop(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConfigError::Desktop(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_shortcut_names(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Searches each directory of a `PATH`-style value for a qdbus candidate
pub fn locate_in(path_var: &OsStr) -> Option<String> {
    QDBUS_CANDIDATES
        .iter()
        .find(|candidate| is_on_path(path_var, candidate))
        .map(|candidate| candidate.to_string())
}

/// Whether a regular file called `name` exists in any `PATH` directory
pub(crate) fn is_on_path(path_var: &OsStr, name: &str) -> bool {
    env::split_paths(path_var).any(|dir| is_program(&dir.join(name)))
}

fn is_program(path: &Path) -> bool {
    path.is_file()
}

/// One name per line; blank lines dropped, result sorted and deduplicated
pub fn parse_shortcut_names(stdout: &str) -> Vec<String> {
    let mut names: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests;
