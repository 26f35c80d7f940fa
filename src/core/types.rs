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

//! src/core/types.rs
//!
//! Core type definitions for gesture binding management
//!
//! This module defines the fundamental types used throughout the application:
//! - `GestureType`: The two libinput gesture families (swipe, pinch)
//! - `Direction`: Every direction libinput-gestures reports
//! - `Gesture`: A validated type + direction pair with its display label
//! - `ActionKind` / `GestureAction`: What a binding does when triggered
//! - `GestureBinding`: A fully decoded `gesture` line
//!
//! The label and phrase tables are plain `match` expressions over enums, so
//! there is no mutable global lookup state anywhere in the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::parser;

/// Gesture family as written in the config file
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureType {
    /// Multi-finger swipe
    Swipe,
    /// Two-or-more finger pinch or rotation
    Pinch,
}

impl GestureType {
    /// Keyword used in the config file (`swipe`, `pinch`)
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureType::Swipe => "swipe",
            GestureType::Pinch => "pinch",
        }
    }

    /// Capitalised word used in display labels
    pub fn label(&self) -> &'static str {
        match self {
            GestureType::Swipe => "Swipe",
            GestureType::Pinch => "Pinch",
        }
    }

    /// Parses the config keyword. Matching is exact, like libinput-gestures itself.
    pub fn parse(word: &str) -> Option<Self> {
        match parser::parse_gesture_type(word) {
            Ok(("", gesture_type)) => Some(gesture_type),
            _ => None,
        }
    }

    /// Smallest finger count libinput reports for this family
    pub fn min_fingers(&self) -> u32 {
        match self {
            GestureType::Swipe => 3,
            GestureType::Pinch => 2,
        }
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gesture direction
///
/// The first eight variants belong to swipes, the last four to pinches.
/// Use [`Gesture::new`] to get a pair that is guaranteed to be valid.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    In,
    Out,
    Clockwise,
    Anticlockwise,
}

impl Direction {
    /// Keyword used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::LeftUp => "left_up",
            Direction::LeftDown => "left_down",
            Direction::RightUp => "right_up",
            Direction::RightDown => "right_down",
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Clockwise => "clockwise",
            Direction::Anticlockwise => "anticlockwise",
        }
    }

    /// Word used in display labels (`LeftUp`, not `Left Up`)
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::LeftUp => "LeftUp",
            Direction::LeftDown => "LeftDown",
            Direction::RightUp => "RightUp",
            Direction::RightDown => "RightDown",
            Direction::In => "In",
            Direction::Out => "Out",
            Direction::Clockwise => "Clockwise",
            Direction::Anticlockwise => "Anticlockwise",
        }
    }

    /// Parses a whole direction keyword; `left_upx` or `left` + `_up` leftovers fail
    pub fn parse(word: &str) -> Option<Self> {
        match parser::parse_direction(word) {
            Ok(("", direction)) => Some(direction),
            _ => None,
        }
    }

    /// Whether libinput-gestures accepts this direction for the given family
    pub fn belongs_to(&self, gesture_type: GestureType) -> bool {
        let is_pinch = matches!(
            self,
            Direction::In | Direction::Out | Direction::Clockwise | Direction::Anticlockwise
        );
        match gesture_type {
            GestureType::Swipe => !is_pinch,
            GestureType::Pinch => is_pinch,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A gesture family paired with one of its own directions
///
/// This is the bidirectional mapping between the canonical phrase used in
/// the config (`gesture swipe left_up`) and the label shown to the user
/// (`Swipe LeftUp`).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Gesture {
    pub gesture_type: GestureType,
    pub direction: Direction,
}

impl Gesture {
    /// Every gesture the config format knows about, in menu order
    pub const ALL: [Gesture; 12] = [
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::Up },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::Down },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::Left },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::LeftUp },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::LeftDown },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::Right },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::RightUp },
        Gesture { gesture_type: GestureType::Swipe, direction: Direction::RightDown },
        Gesture { gesture_type: GestureType::Pinch, direction: Direction::In },
        Gesture { gesture_type: GestureType::Pinch, direction: Direction::Out },
        Gesture { gesture_type: GestureType::Pinch, direction: Direction::Clockwise },
        Gesture { gesture_type: GestureType::Pinch, direction: Direction::Anticlockwise },
    ];

    /// Pairs a family with a direction, rejecting combinations like `pinch up`
    pub fn new(gesture_type: GestureType, direction: Direction) -> Option<Self> {
        direction
            .belongs_to(gesture_type)
            .then_some(Self { gesture_type, direction })
    }

    /// Canonical config phrase, e.g. `gesture swipe up`
    pub fn phrase(&self) -> String {
        format!("gesture {} {}", self.gesture_type, self.direction)
    }

    /// Human-readable label, e.g. `Swipe Up`
    pub fn label(&self) -> String {
        format!("{} {}", self.gesture_type.label(), self.direction.label())
    }

    /// Looks up a canonical phrase. Whitespace between words may be any width.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        match parser::parse_gesture_phrase(phrase.trim()) {
            Ok(("", gesture)) => Some(gesture),
            _ => None,
        }
    }

    /// Reverse lookup from a display label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gesture| gesture.label() == label)
    }

    pub fn min_fingers(&self) -> u32 {
        self.gesture_type.min_fingers()
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category of action a binding triggers
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ActionKind {
    /// `xdotool key <combo>`
    KeyboardShortcut,
    /// A KWin global shortcut invoked over D-Bus with qdbus
    DesktopAction,
    /// Anything else, run as a shell command
    Command,
}

impl ActionKind {
    /// Label shown next to a binding
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::KeyboardShortcut => "Keyboard shortcut",
            ActionKind::DesktopAction => "Plasma action",
            ActionKind::Command => "Command",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Decoded action with its user-facing payload
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload")]
pub enum GestureAction {
    /// xdotool key combo, e.g. `ctrl+super+Page_Down`
    KeyboardShortcut(String),
    /// KWin shortcut name, e.g. `Expose`
    DesktopAction(String),
    /// Full command text
    Command(String),
}

impl GestureAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GestureAction::KeyboardShortcut(_) => ActionKind::KeyboardShortcut,
            GestureAction::DesktopAction(_) => ActionKind::DesktopAction,
            GestureAction::Command(_) => ActionKind::Command,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            GestureAction::KeyboardShortcut(payload)
            | GestureAction::DesktopAction(payload)
            | GestureAction::Command(payload) => payload,
        }
    }
}

/// A `gesture` line decoded for display and editing
///
/// `invocation` keeps every token after the finger count, joined by single
/// spaces, so [`GestureBinding::to_line`] reproduces the canonical line even
/// for desktop actions whose D-Bus arguments are not part of the payload.
///
/// # Example
/// ```
/// use gesture_config_manager::core::{Direction, Gesture, GestureAction, GestureBinding, GestureType};
///
/// let binding = GestureBinding {
///     gesture: Gesture::new(GestureType::Swipe, Direction::Up).unwrap(),
///     finger_count: 3,
///     action: GestureAction::KeyboardShortcut("super+Up".to_string()),
///     invocation: "xdotool key super+Up".to_string(),
/// };
/// assert_eq!(binding.canonical_key(), "gesture swipe up 3");
/// assert_eq!(binding.to_line(), "gesture swipe up 3 xdotool key super+Up");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GestureBinding {
    pub gesture: Gesture,
    pub finger_count: u32,
    pub action: GestureAction,
    pub invocation: String,
}

impl GestureBinding {
    pub fn label(&self) -> String {
        self.gesture.label()
    }

    pub fn action_kind(&self) -> ActionKind {
        self.action.kind()
    }

    pub fn payload(&self) -> &str {
        self.action.payload()
    }

    /// Key used to delete or replace this binding, e.g. `gesture swipe up 3`
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.gesture, self.finger_count)
    }

    /// Canonical config line without the trailing newline
    pub fn to_line(&self) -> String {
        format!("{} {}", self.canonical_key(), self.invocation)
    }
}

impl fmt::Display for GestureBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

/// Builds the `gesture <type> <direction> <fingers>` key for a binding
pub fn canonical_key(gesture: &Gesture, finger_count: u32) -> String {
    format!("{} {}", gesture.phrase(), finger_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_type_display() {
        assert_eq!(format!("{}", GestureType::Swipe), "swipe");
        assert_eq!(format!("{}", GestureType::Pinch), "pinch");
    }

    #[test]
    fn test_direction_round_trip() {
        for gesture in Gesture::ALL {
            let word = gesture.direction.as_str();
            assert_eq!(Direction::parse(word), Some(gesture.direction));
        }
    }

    #[test]
    fn test_invalid_pairs_rejected() {
        assert!(Gesture::new(GestureType::Pinch, Direction::Up).is_none());
        assert!(Gesture::new(GestureType::Swipe, Direction::Clockwise).is_none());
        assert!(Gesture::new(GestureType::Swipe, Direction::RightDown).is_some());
    }

    #[test]
    fn test_action_kind_labels() {
        assert_eq!(ActionKind::KeyboardShortcut.label(), "Keyboard shortcut");
        assert_eq!(ActionKind::DesktopAction.label(), "Plasma action");
        assert_eq!(ActionKind::Command.label(), "Command");
    }
}
