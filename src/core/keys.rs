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

//! src/core/keys.rs
//!
//! Key-combo translation from toolkit key sequences to xdotool key names
//!
//! GUI toolkits report recorded shortcuts as `Ctrl+Meta+PgDown`; xdotool
//! expects `ctrl+super+Page_Down`. Only the names that differ need a table
//! entry: xdotool accepts most other key names lower-cased as they are.

/// Maps one lower-cased toolkit key name to its xdotool spelling
///
/// Returns `None` when the lower-cased name is already what xdotool expects.
fn xdotool_name(key: &str) -> Option<&'static str> {
    let name = match key {
        "meta" => "super",
        "pgdown" => "Page_Down",
        "pgup" => "Page_Up",
        "right" => "Right",
        "left" => "Left",
        "up" => "Up",
        "down" => "Down",
        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",
        _ => return None,
    };
    Some(name)
}

/// Translates a `+`-joined key sequence into xdotool syntax
///
/// Every segment is lower-cased and passed through the key table. Unknown
/// keys are kept in their lower-cased form, so this never fails.
///
/// # Example
/// ```
/// use gesture_config_manager::core::keys::translate;
///
/// assert_eq!(translate("Ctrl+Meta+PgDown"), "ctrl+super+Page_Down");
/// assert_eq!(translate("Alt+Q"), "alt+q");
/// ```
pub fn translate(combo: &str) -> String {
    combo
        .split('+')
        .map(|segment| {
            let lowered = segment.to_lowercase();
            match xdotool_name(&lowered) {
                Some(name) => name.to_string(),
                None => lowered,
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Builds the action text that sends a translated key combo through xdotool
pub fn shortcut_action(combo: &str) -> String {
    format!("xdotool key {}", translate(combo))
}
