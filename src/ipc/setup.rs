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

//! libinput-gestures service control
//!
//! libinput-gestures reads its config only at startup, so edits take effect
//! after `libinput-gestures-setup restart`. This wraps that tool.
//!
//! # Example
//! ```
//! use gesture_config_manager::ipc::{ClientMode, ServiceCommand, SetupClient};
//!
//! let client = SetupClient::new(ClientMode::DryRun);
//! assert_eq!(client.command_line(ServiceCommand::Restart), "libinput-gestures-setup restart");
//! assert!(client.run(ServiceCommand::Restart).unwrap().is_empty());
//! ```

use std::{env, ffi::OsStr, fmt, process::Command};

use crate::config::ConfigError;
use crate::ipc::{is_on_path, ClientMode};

/// Setup tool shipped with libinput-gestures
pub const SETUP_BINARY: &str = "libinput-gestures-setup";

/// Subcommands of `libinput-gestures-setup` this crate drives
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServiceCommand {
    Status,
    Start,
    Stop,
    Restart,
}

impl ServiceCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCommand::Status => "status",
            ServiceCommand::Start => "start",
            ServiceCommand::Stop => "stop",
            ServiceCommand::Restart => "restart",
        }
    }
}

impl fmt::Display for ServiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service state read from `libinput-gestures-setup status`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ServiceStatus {
    pub installed: bool,
    pub running: bool,
    pub autostart: bool,
}

impl ServiceStatus {
    /// Reads the status text by the phrases the setup tool prints
    ///
    /// Negative lines (`is not running`) never contain the positive phrase,
    /// so plain substring checks are enough.
    pub fn from_output(stdout: &str) -> Self {
        Self {
            installed: stdout.contains("is installed"),
            running: stdout.contains("is running"),
            autostart: stdout.contains("is set to autostart"),
        }
    }
}

/// Wrapper around `libinput-gestures-setup`
#[derive(Clone, Debug)]
pub struct SetupClient {
    binary: String,
    mode: ClientMode,
}

impl SetupClient {
    pub fn new(mode: ClientMode) -> Self {
        Self::with_binary(SETUP_BINARY, mode)
    }

    pub fn with_binary(binary: impl Into<String>, mode: ClientMode) -> Self {
        Self {
            binary: binary.into(),
            mode,
        }
    }

    /// Live client if the setup tool is on `PATH`
    pub fn locate() -> Option<Self> {
        let path_var = env::var_os("PATH")?;
        Self::locate_in(&path_var)
    }

    pub fn locate_in(path_var: &OsStr) -> Option<Self> {
        is_on_path(path_var, SETUP_BINARY).then(|| Self::new(ClientMode::Live))
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    /// Shell form of the command, for messages and logs
    pub fn command_line(&self, command: ServiceCommand) -> String {
        format!("{} {}", self.binary, command)
    }

    /// Runs one setup subcommand and returns its stdout
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Desktop` if the tool cannot be started or exits
    /// with a failure status.
    pub fn run(&self, command: ServiceCommand) -> Result<String, ConfigError> {
        if self.mode == ClientMode::DryRun {
            tracing::debug!(command = %self.command_line(command), "dry run: not running setup tool");
            return Ok(String::new());
        }

        tracing::info!(command = %self.command_line(command), "running setup tool");
        let output = Command::new(&self.binary)
            .arg(command.as_str())
            .output()
            .map_err(|e| ConfigError::Desktop(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConfigError::Desktop(format!(
                "{} exited with {}: {}",
                self.command_line(command),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs `status` and decodes it
    pub fn status(&self) -> Result<ServiceStatus, ConfigError> {
        Ok(ServiceStatus::from_output(&self.run(ServiceCommand::Status)?))
    }
}
