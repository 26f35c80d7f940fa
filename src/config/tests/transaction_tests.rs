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

use super::super::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// ConfigTransaction Tests
// ============================================================================

#[test]
fn test_transaction_basic_flow() {
    // Setup: Create temp config with original content
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("libinput-gestures.conf");
    let original_content = "# Original config\ngesture swipe up 3 xdotool key super+Up\n";
    fs::write(&config_path, original_content).unwrap();

    let manager = ConfigManager::new(config_path.clone()).unwrap();

    let mut tx = ConfigTransaction::begin(&manager).unwrap();
    assert_eq!(tx.original().to_text(), original_content);
    assert!(!tx.is_modified());

    tx.document_mut().push_line("swipe_threshold 0");
    assert!(tx.is_modified());

    // Nothing is written before commit
    assert_eq!(fs::read_to_string(&config_path).unwrap(), original_content);

    tx.commit().unwrap();

    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        "# Original config\ngesture swipe up 3 xdotool key super+Up\nswipe_threshold 0\n"
    );
}

#[test]
fn test_dropped_transaction_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("libinput-gestures.conf");
    fs::write(&config_path, "device all\n").unwrap();
    let manager = ConfigManager::new(config_path.clone()).unwrap();

    {
        let mut tx = ConfigTransaction::begin(&manager).unwrap();
        tx.document_mut().remove_key("device");
        assert!(tx.document().is_empty());
    }

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "device all\n");
}

#[test]
fn test_begin_reads_fresh_state() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("libinput-gestures.conf");
    let manager = ConfigManager::new(config_path.clone()).unwrap();

    let tx = ConfigTransaction::begin(&manager).unwrap();
    assert!(tx.document().is_empty());
    drop(tx);

    // External edit between operations is seen by the next transaction
    fs::write(&config_path, "# edited elsewhere\n").unwrap();
    let tx = ConfigTransaction::begin(&manager).unwrap();
    assert_eq!(tx.document().lines(), ["# edited elsewhere\n"]);
}

#[test]
fn test_last_writer_wins() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("libinput-gestures.conf");
    fs::write(&config_path, "device all\n").unwrap();
    let manager = ConfigManager::new(config_path.clone()).unwrap();

    let mut tx = ConfigTransaction::begin(&manager).unwrap();
    fs::write(&config_path, "# concurrent edit\n").unwrap();

    tx.document_mut().push_line("swipe_threshold 10");
    tx.commit().unwrap();

    // The concurrent edit is not detected and gets overwritten
    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        "device all\nswipe_threshold 10\n"
    );
}

#[test]
fn test_write_atomic_replaces_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file.conf");
    fs::write(&path, "a much longer original content\n").unwrap();

    transaction::write_atomic(&path, "short\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
}
