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

//! IPC module tests
//!
//! Contains test suites for qdbus integration and service control. Nothing here spawns qdbus:
//! clients run in DryRun mode and lookups use a fake PATH.

use std::{env, fs};
use tempfile::TempDir;

use crate::{
    core::{parser::classify_line, ConfigDocument, GestureAction},
    ipc::{
        locate_in, parse_shortcut_names, ClientMode, QdbusClient, ServiceCommand, ServiceStatus,
        SetupClient,
    },
};

#[test]
fn test_locate_prefers_plain_qdbus() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("qdbus-qt5"), "").unwrap();
    fs::write(second.path().join("qdbus"), "").unwrap();

    let path_var = env::join_paths([first.path(), second.path()]).unwrap();
    assert_eq!(locate_in(&path_var), Some("qdbus".to_string()));
}

#[test]
fn test_locate_falls_back_to_qt5_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("qdbus-qt5"), "").unwrap();

    let path_var = env::join_paths([dir.path()]).unwrap();
    assert_eq!(locate_in(&path_var), Some("qdbus-qt5".to_string()));
}

#[test]
fn test_locate_ignores_directories_and_missing() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("qdbus")).unwrap();

    let path_var = env::join_paths([dir.path()]).unwrap();
    assert_eq!(locate_in(&path_var), None);
}

#[test]
fn test_dryrun_never_queries() {
    let client = QdbusClient::new("definitely-not-installed-qdbus", ClientMode::DryRun);
    assert_eq!(client.mode(), ClientMode::DryRun);
    assert!(client.shortcut_names().unwrap().is_empty());
}

#[test]
fn test_live_client_reports_missing_binary() {
    let client = QdbusClient::new("definitely-not-installed-qdbus", ClientMode::Live);
    assert!(client.shortcut_names().is_err());
}

#[test]
fn test_desktop_action_line_is_well_formed() {
    let client = QdbusClient::new("qdbus-qt5", ClientMode::DryRun);
    let line = format!("gesture swipe up 4 {}", client.desktop_action("Window Maximize"));

    assert!(classify_line(&line).is_retained());

    let bindings = ConfigDocument::from_text(&line).bindings().unwrap();
    assert_eq!(
        bindings[0].action,
        GestureAction::DesktopAction("Window Maximize".to_string())
    );
}

#[test]
fn test_kde_defaults_use_client_binary() {
    let client = QdbusClient::new("qdbus6", ClientMode::DryRun);
    let defaults = client.kde_defaults();
    assert!(defaults.contains("gesture swipe down 3 qdbus6 org.kde.kglobalaccel"));
    assert!(!defaults.contains("{}"));
}

#[test]
fn test_parse_shortcut_names() {
    let stdout = "Window Maximize\nExpose\n\nShowDesktopGrid\nExpose\n";
    assert_eq!(
        parse_shortcut_names(stdout),
        vec!["Expose", "ShowDesktopGrid", "Window Maximize"]
    );
}

#[test]
fn test_setup_dryrun_spawns_nothing() {
    let client = SetupClient::with_binary("definitely-not-installed-setup", ClientMode::DryRun);
    for command in [
        ServiceCommand::Status,
        ServiceCommand::Start,
        ServiceCommand::Stop,
        ServiceCommand::Restart,
    ] {
        assert_eq!(client.run(command).unwrap(), "");
    }
    assert_eq!(client.status().unwrap(), ServiceStatus::default());
}

#[test]
fn test_setup_command_line() {
    let client = SetupClient::new(ClientMode::DryRun);
    assert_eq!(client.binary(), "libinput-gestures-setup");
    assert_eq!(
        client.command_line(ServiceCommand::Status),
        "libinput-gestures-setup status"
    );
    assert_eq!(client.command_line(ServiceCommand::Stop), "libinput-gestures-setup stop");
}

#[test]
fn test_setup_live_reports_missing_binary() {
    let client = SetupClient::with_binary("definitely-not-installed-setup", ClientMode::Live);
    assert!(client.run(ServiceCommand::Status).is_err());
}

#[test]
fn test_setup_locate_in() {
    let dir = TempDir::new().unwrap();
    let path_var = env::join_paths([dir.path()]).unwrap();
    assert!(SetupClient::locate_in(&path_var).is_none());

    fs::write(dir.path().join("libinput-gestures-setup"), "").unwrap();
    let client = SetupClient::locate_in(&path_var).unwrap();
    assert_eq!(client.mode(), ClientMode::Live);
}

#[test]
fn test_service_status_from_output() {
    let running = "libinput-gestures is installed as /usr/bin/libinput-gestures\n\
                   libinput-gestures is running as PID 1234\n\
                   libinput-gestures is set to autostart in KDE as ~/.config/autostart/libinput-gestures.desktop\n";
    assert_eq!(
        ServiceStatus::from_output(running),
        ServiceStatus {
            installed: true,
            running: true,
            autostart: true
        }
    );

    let stopped = "libinput-gestures is installed as /usr/bin/libinput-gestures\n\
                   libinput-gestures is not running\n\
                   libinput-gestures is not set to autostart\n";
    assert_eq!(
        ServiceStatus::from_output(stopped),
        ServiceStatus {
            installed: true,
            running: false,
            autostart: false
        }
    );
}
