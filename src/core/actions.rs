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

//! src/core/actions.rs
//!
//! Composition of binding lines and the KDE Plasma default set

use crate::core::{keys, types::{canonical_key, Gesture}};

/// D-Bus service, object and method used to trigger KWin global shortcuts
const KWIN_INVOKE_SHORTCUT: &str = "org.kde.kglobalaccel /component/kwin invokeShortcut";

/// Builds a full config line (without terminator)
///
/// # Example
/// ```
/// use gesture_config_manager::core::{actions::compose_line, Direction, Gesture, GestureType};
///
/// let gesture = Gesture::new(GestureType::Swipe, Direction::Up).unwrap();
/// assert_eq!(
///     compose_line(&gesture, 3, "xdotool key super+Up"),
///     "gesture swipe up 3 xdotool key super+Up"
/// );
/// ```
pub fn compose_line(gesture: &Gesture, finger_count: u32, action: &str) -> String {
    format!("{} {}", canonical_key(gesture, finger_count), action.trim())
}

/// Action text for a recorded keyboard shortcut
pub fn keyboard_shortcut(combo: &str) -> String {
    keys::shortcut_action(combo)
}

/// Action text that invokes a KWin global shortcut by name
pub fn desktop_action(qdbus: &str, name: &str) -> String {
    format!("{} {} \"{}\"", qdbus, KWIN_INVOKE_SHORTCUT, name)
}

/// KDE Plasma defaults, rendered for the given qdbus binary
pub fn kde_defaults(qdbus: &str) -> String {
    let invoke = |name: &str| desktop_action(qdbus, name);
    format!(
        "
#This default settings for KDE Plasma generated by gesture-config-manager
#
#Browser actions Back and Forward
gesture swipe left 3 xdotool key alt+Right
gesture swipe right 3 xdotool key alt+Left
#
#Present Windows
gesture swipe down 3 {}
#
#Desktop Grid
gesture swipe up 3 {}
#
#Minimize
gesture swipe down 4 {}
#
#Maximize
gesture swipe up 4 {}
#
#Next virtual desktop
gesture swipe left 4 {}
#Previous virtual desktop
gesture swipe right 4 {}
",
        invoke("Expose"),
        invoke("ShowDesktopGrid"),
        invoke("Window Minimize"),
        invoke("Window Maximize"),
        invoke("Switch to Next Desktop"),
        invoke("Switch to Previous Desktop"),
    )
}

/// What [`kde_defaults`] binds, for showing before the user confirms
pub const KDE_DEFAULTS_DESCRIPTION: &str = "\
Present windows: Swipe Down (3 fingers)
Desktop Grid: Swipe Up (3 fingers)
Maximize: Swipe Up (4 fingers)
Minimize: Swipe Down (4 fingers)
Next virtual desktop: Swipe Left (4 fingers)
Previous virtual desktop: Swipe Right (4 fingers)
Browser 'Back': Swipe Right (3 fingers)
Browser 'Forward': Swipe Left (3 fingers)
";
