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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the data structures and algorithms for gesture
//! configuration management, including:
//! - Type definitions for gestures, directions and actions
//! - Line classification and display decoding
//! - Document-level repair, key removal and display ordering
//! - Key-combo translation for xdotool
//! - Request validation and binding line composition
//!
//! All business logic is isolated from I/O so it can be unit tested without
//! touching the filesystem.

pub mod actions;
pub mod document;
pub mod keys;
pub mod parser;
pub mod types;
pub mod validator;

pub use document::{sort_for_display, ConfigDocument, DroppedLine, RepairReport};
pub use parser::{ConfigLine, ParseError};
pub use types::*;
pub use validator::{validate_upsert, ValidationError};

#[cfg(test)]
mod tests;
