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

//! Request validation for mutating config operations
//!
//! This module checks the arguments of an edit before the config file is
//! touched:
//! - An upsert needs a gesture phrase, a non-zero finger count and a line
//! - The line must start with the key it is filed under
//! - A line must be a single line (an embedded newline would smuggle in a
//!   second statement that bypasses these checks)
//! - A delete needs a non-empty key
//!
//! Nothing here reads or writes files.

use thiserror::Error;

use crate::core::document::line_has_key;

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// No gesture phrase supplied
    #[error("Gesture action is empty")]
    EmptyGesture,

    /// Finger count of zero
    #[error("Finger count must be at least 1")]
    ZeroFingers,

    /// No line supplied
    #[error("Binding line is empty")]
    EmptyLine,

    /// Line contains a newline before its end
    #[error("Binding line spans multiple lines: '{0}'")]
    MultiLine(String),

    /// Line does not begin with the key it replaces
    #[error("Line '{line}' does not start with '{key}'")]
    KeyMismatch { key: String, line: String },

    /// Delete called without a key
    #[error("Refusing to delete with an empty key")]
    EmptyKey,
}

/// Validates the arguments of an upsert
///
/// # Example
/// ```
/// use gesture_config_manager::core::validator::{validate_upsert, ValidationError};
///
/// assert!(validate_upsert("gesture swipe up", 3, "gesture swipe up 3 xdotool key super+Up").is_ok());
/// assert_eq!(validate_upsert("gesture swipe up", 0, "x"), Err(ValidationError::ZeroFingers));
/// ```
pub fn validate_upsert(gesture_action: &str, finger_count: u32, line: &str) -> Result<(), ValidationError> {
    if gesture_action.trim().is_empty() {
        return Err(ValidationError::EmptyGesture);
    }
    if finger_count == 0 {
        return Err(ValidationError::ZeroFingers);
    }

    let body = line.strip_suffix('\n').unwrap_or(line);
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyLine);
    }
    if body.contains('\n') {
        return Err(ValidationError::MultiLine(body.to_string()));
    }

    let key = format!("{} {}", gesture_action.trim(), finger_count);
    if !line_has_key(body, &key) {
        return Err(ValidationError::KeyMismatch {
            key,
            line: body.to_string(),
        });
    }

    Ok(())
}

/// Validates the key passed to a delete
pub fn validate_delete_key(key: &str) -> Result<(), ValidationError> {
    if key.trim().is_empty() {
        Err(ValidationError::EmptyKey)
    } else {
        Ok(())
    }
}
