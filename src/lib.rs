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

//! Gesture Config Manager
//!
//! A configuration engine for libinput-gestures: it reads, edits, repairs
//! and rewrites `~/.config/libinput-gestures.conf`, and translates recorded
//! key combinations into the names `xdotool` understands.
//!
//! # Features
//!
//! - **Display decoding:** Every `gesture` line becomes a typed binding
//! - **Upsert and delete:** One line per gesture and finger count
//! - **Explicit repair:** Malformed lines are removed only on request
//! - **KDE Plasma defaults:** Installed with a `.old` backup of the previous file
//! - **Atomic Operations:** Temp-file-then-rename writes, never a half-written config
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, line grammar, documents, key translation)
//! - **`config`:** File operations (reading, atomic writes, backups, watching)
//! - **`ipc`:** qdbus lookup and KWin shortcut names
//!
//! The config file is the only state. Nothing is cached between calls.
//!
//! # Examples
//!
//! ## Listing bindings
//!
//! ```no_run
//! use gesture_config_manager::{sort_for_display, ConfigManager};
//!
//! let manager = ConfigManager::with_default_path()?;
//! let mut bindings = manager.parse_for_display()?;
//! sort_for_display(&mut bindings);
//! for binding in &bindings {
//!     println!("{} {}: {}", binding.label(), binding.finger_count, binding.payload());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Binding a recorded shortcut
//!
//! ```no_run
//! use gesture_config_manager::core::actions::{compose_line, keyboard_shortcut};
//! use gesture_config_manager::{ConfigManager, Gesture};
//!
//! let manager = ConfigManager::with_default_path()?;
//! let gesture = Gesture::from_label("Swipe Up").ok_or("unknown gesture")?;
//! let line = compose_line(&gesture, 3, &keyboard_shortcut("Meta+PgUp"));
//!
//! // Writes `gesture swipe up 3 xdotool key super+Page_Up`
//! manager.upsert(&gesture.phrase(), 3, &line)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod ipc;

// Re-export commonly used types for convenience
pub use crate::config::{ConfigError, ConfigManager};
pub use crate::core::{
    keys::translate, sort_for_display, ActionKind, Direction, Gesture, GestureAction,
    GestureBinding, GestureType,
};
