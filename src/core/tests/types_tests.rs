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

use crate::core::types::{ActionKind, Direction, Gesture, GestureAction, GestureBinding, GestureType};

#[test]
fn test_all_gestures_are_valid_pairs() {
    for gesture in Gesture::ALL {
        assert!(gesture.direction.belongs_to(gesture.gesture_type));
    }
    let swipes = Gesture::ALL
        .iter()
        .filter(|g| g.gesture_type == GestureType::Swipe)
        .count();
    assert_eq!(swipes, 8);
}

#[test]
fn test_phrase_label_mapping_is_bidirectional() {
    for gesture in Gesture::ALL {
        assert_eq!(Gesture::from_phrase(&gesture.phrase()), Some(gesture));
        assert_eq!(Gesture::from_label(&gesture.label()), Some(gesture));
    }
}

#[test]
fn test_known_labels() {
    let left_up = Gesture::from_phrase("gesture swipe left_up").unwrap();
    assert_eq!(left_up.label(), "Swipe LeftUp");

    let pinch = Gesture::from_label("Pinch Anticlockwise").unwrap();
    assert_eq!(pinch.phrase(), "gesture pinch anticlockwise");
}

#[test]
fn test_phrase_with_wide_whitespace() {
    // Older configs wrote "gesture swipe  left_down"
    assert_eq!(
        Gesture::from_phrase("gesture swipe  left_down"),
        Gesture::new(GestureType::Swipe, Direction::LeftDown)
    );
}

#[test]
fn test_unknown_phrases() {
    assert!(Gesture::from_phrase("gesture swipe sideways").is_none());
    assert!(Gesture::from_phrase("gesture pinch up").is_none());
    assert!(Gesture::from_phrase("gesture swipe up 3").is_none());
    assert!(Gesture::from_phrase("device swipe up").is_none());
    assert!(Gesture::from_label("Swipe Sideways").is_none());
}

#[test]
fn test_min_fingers() {
    let swipe = Gesture::new(GestureType::Swipe, Direction::Up).unwrap();
    let pinch = Gesture::new(GestureType::Pinch, Direction::In).unwrap();
    assert_eq!(swipe.min_fingers(), 3);
    assert_eq!(pinch.min_fingers(), 2);
}

#[test]
fn test_binding_reconstruction() {
    let binding = GestureBinding {
        gesture: Gesture::new(GestureType::Swipe, Direction::Down).unwrap(),
        finger_count: 4,
        action: GestureAction::DesktopAction("Window Minimize".to_string()),
        invocation: "qdbus org.kde.kglobalaccel /component/kwin invokeShortcut \"Window Minimize\"".to_string(),
    };

    assert_eq!(binding.label(), "Swipe Down");
    assert_eq!(binding.action_kind(), ActionKind::DesktopAction);
    assert_eq!(binding.payload(), "Window Minimize");
    assert_eq!(binding.canonical_key(), "gesture swipe down 4");
    assert_eq!(
        format!("{}", binding),
        "gesture swipe down 4 qdbus org.kde.kglobalaccel /component/kwin invokeShortcut \"Window Minimize\""
    );
}

#[test]
fn test_vocabulary_words_must_match_whole() {
    assert_eq!(Direction::parse("left_up"), Some(Direction::LeftUp));
    assert_eq!(Direction::parse("left_upx"), None);
    assert_eq!(Direction::parse("inward"), None);
    assert_eq!(GestureType::parse("swipes"), None);
    assert_eq!(
        Gesture::from_phrase("  gesture\tpinch  in "),
        Gesture::new(GestureType::Pinch, Direction::In)
    );
}
