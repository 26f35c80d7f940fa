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

//! Parser module tests
//!
//! Tests for parsing libinput-gestures configuration lines:
//! - Repair-grammar classification of every statement kind
//! - nom parsing of the gesture phrase
//! - Display decoding of the three action kinds
//! - Error reporting with line numbers

use crate::core::{
    parser::*,
    types::{ActionKind, Direction, GestureAction, GestureType},
};

#[test]
fn test_comments_and_blank_lines() {
    assert_eq!(classify_line("# comment\n"), ConfigLine::Comment("# comment"));
    assert_eq!(classify_line("#\n"), ConfigLine::Comment("#"));
    assert_eq!(classify_line("\n"), ConfigLine::Comment(""));
    assert_eq!(classify_line(""), ConfigLine::Comment(""));
}

#[test]
fn test_whitespace_only_line_is_malformed() {
    assert_eq!(
        classify_line("   \n"),
        ConfigLine::Malformed(MalformedReason::NoKeyword)
    );
}

#[test]
fn test_indented_comment_is_not_a_comment() {
    assert_eq!(
        classify_line("  # indented\n"),
        ConfigLine::Malformed(MalformedReason::UnknownKeyword("#".to_string()))
    );
}

#[test]
fn test_unknown_keyword_dropped() {
    assert!(!classify_line("hold_threshold 5\n").is_retained());
    assert!(!classify_line("some random noise\n").is_retained());
}

#[test]
fn test_device_and_threshold_arity() {
    assert_eq!(classify_line("device all\n"), ConfigLine::Device("all"));
    assert_eq!(classify_line("swipe_threshold 0\n"), ConfigLine::SwipeThreshold("0"));

    assert_eq!(
        classify_line("device DLL06E5:01 06CB:7A13 Touchpad\n"),
        ConfigLine::Malformed(MalformedReason::WrongArity {
            keyword: "device".to_string(),
            found: 4,
        })
    );
    assert!(!classify_line("swipe_threshold\n").is_retained());
}

#[test]
fn test_valid_xdotool_line_kept() {
    let line = classify_line("gesture pinch in 2 xdotool key ctrl+alt+t\n");
    assert!(matches!(line, ConfigLine::Gesture(ref tokens) if tokens.len() == 7));
}

#[test]
fn test_xdotool_line_with_split_combo_dropped() {
    assert_eq!(
        classify_line("gesture swipe up 3 xdotool key ctrl alt t\n"),
        ConfigLine::Malformed(MalformedReason::XdotoolArity(9))
    );
    assert_eq!(
        classify_line("gesture swipe up 3 xdotool key\n"),
        ConfigLine::Malformed(MalformedReason::XdotoolArity(6))
    );
}

#[test]
fn test_xdotool_other_subcommand_dropped() {
    assert_eq!(
        classify_line("gesture swipe up 3 xdotool type hello\n"),
        ConfigLine::Malformed(MalformedReason::XdotoolNotKey)
    );
    assert_eq!(
        classify_line("gesture swipe up 3 xdotool\n"),
        ConfigLine::Malformed(MalformedReason::XdotoolNotKey)
    );
}

#[test]
fn test_unquoted_qdbus_line_dropped() {
    let line = "gesture swipe down 3 qdbus org.kde.kglobalaccel /component/kwin invokeShortcut Expose";
    assert_eq!(
        classify_line(line),
        ConfigLine::Malformed(MalformedReason::UnquotedDesktopAction)
    );
}

#[test]
fn test_quoted_qdbus_line_kept() {
    let line = "gesture swipe down 4 qdbus-qt5 org.kde.kglobalaccel /component/kwin invokeShortcut \"Window Minimize\"\n";
    assert!(classify_line(line).is_retained());
}

#[test]
fn test_free_command_kept_unconditionally() {
    assert!(classify_line("gesture swipe up 3 notify-send 'hello world'\n").is_retained());
}

#[test]
fn test_unknown_gesture_dropped() {
    assert_eq!(
        classify_line("gesture swipe sideways 3 ls\n"),
        ConfigLine::Malformed(MalformedReason::UnknownGesture("gesture swipe sideways".to_string()))
    );
    assert!(!classify_line("gesture pinch up 2 ls\n").is_retained());
}

#[test]
fn test_invalid_finger_count_dropped() {
    assert_eq!(
        classify_line("gesture swipe up three xdotool key super+Up\n"),
        ConfigLine::Malformed(MalformedReason::InvalidFingerCount("three".to_string()))
    );
    assert!(!classify_line("gesture swipe up 0 ls\n").is_retained());
    assert!(!classify_line("gesture swipe up -3 ls\n").is_retained());
}

#[test]
fn test_short_gesture_line_dropped() {
    assert_eq!(
        classify_line("gesture swipe up 3\n"),
        ConfigLine::Malformed(MalformedReason::TooFewFields(4))
    );
}

#[test]
fn test_tabs_are_separators() {
    assert!(classify_line("gesture\tpinch\tin\t2\txdotool key ctrl+minus\n").is_retained());
}

#[test]
fn test_dispatcher_classification() {
    assert_eq!(Dispatcher::of("xdotool"), Dispatcher::Xdotool);
    assert_eq!(Dispatcher::of("qdbus"), Dispatcher::Qdbus);
    assert_eq!(Dispatcher::of("/usr/lib/qt6/bin/qdbus6"), Dispatcher::Qdbus);
    assert_eq!(Dispatcher::of("xdotool-wrapper"), Dispatcher::Other);
}

#[test]
fn test_parse_gesture_type() {
    assert!(matches!(parse_gesture_type("swipe up"), Ok((" up", GestureType::Swipe))));
    assert!(matches!(parse_gesture_type("pinch in"), Ok((" in", GestureType::Pinch))));
    assert!(parse_gesture_type("hold").is_err());
}

#[test]
fn test_parse_direction_prefers_compound() {
    assert!(matches!(parse_direction("left_up"), Ok(("", Direction::LeftUp))));
    assert!(matches!(parse_direction("right_down 3"), Ok((" 3", Direction::RightDown))));
    assert!(matches!(parse_direction("left"), Ok(("", Direction::Left))));
}

#[test]
fn test_parse_gesture_phrase() {
    let (rest, gesture) = parse_gesture_phrase("gesture swipe left_down 3").unwrap();
    assert_eq!(rest, " 3");
    assert_eq!(gesture.label(), "Swipe LeftDown");

    assert!(parse_gesture_phrase("gesture pinch up").is_err());
    assert!(parse_gesture_phrase("gesture swipe upward").is_err());
    assert!(parse_gesture_phrase("gestures swipe up").is_err());
}

#[test]
fn test_decode_keyboard_shortcut() {
    let binding = parse_gesture_line("gesture swipe up 3 xdotool key super+Up\n", 1).unwrap();
    assert_eq!(binding.label(), "Swipe Up");
    assert_eq!(binding.finger_count, 3);
    assert_eq!(binding.action, GestureAction::KeyboardShortcut("super+Up".to_string()));
    assert_eq!(binding.canonical_key(), "gesture swipe up 3");
}

#[test]
fn test_decode_desktop_action() {
    let line = "gesture swipe left 4 qdbus org.kde.kglobalaccel /component/kwin invokeShortcut \"Switch to Next Desktop\"\n";
    let binding = parse_gesture_line(line, 1).unwrap();
    assert_eq!(binding.action_kind(), ActionKind::DesktopAction);
    assert_eq!(binding.payload(), "Switch to Next Desktop");
    assert_eq!(binding.to_line(), line.trim_end());
}

#[test]
fn test_desktop_action_falls_back_to_last_token() {
    let line = "gesture swipe up 3 qdbus org.kde.kglobalaccel /component/kwin invokeShortcut Expose\"";
    let binding = parse_gesture_line(line, 1).unwrap();
    assert_eq!(binding.payload(), "Expose");
}

#[test]
fn test_desktop_action_takes_first_quoted_string() {
    let line = "gesture swipe up 3 qdbus \"first\" \"second\"";
    let binding = parse_gesture_line(line, 1).unwrap();
    assert_eq!(binding.payload(), "first");
}

#[test]
fn test_decode_command() {
    let binding = parse_gesture_line("gesture pinch out 2 notify-send   zoom\n", 1).unwrap();
    assert_eq!(binding.action, GestureAction::Command("notify-send zoom".to_string()));
    assert_eq!(binding.invocation, "notify-send zoom");
}

#[test]
fn test_xdotool_without_key_decodes_as_command() {
    let binding = parse_gesture_line("gesture swipe up 3 xdotool type hi", 1).unwrap();
    assert_eq!(binding.action_kind(), ActionKind::Command);
    assert_eq!(binding.payload(), "xdotool type hi");
}

#[test]
fn test_decode_errors_carry_line_numbers() {
    assert_eq!(
        parse_gesture_line("gesture swipe up", 7),
        Err(ParseError::TooFewFields { line: 7, found: 3 })
    );
    assert_eq!(
        parse_gesture_line("gesture swipe sideways 3 ls", 2),
        Err(ParseError::UnknownGesture {
            line: 2,
            phrase: "gesture swipe sideways".to_string(),
        })
    );
    assert_eq!(
        parse_gesture_line("gesture swipe up three ls", 4),
        Err(ParseError::InvalidFingerCount {
            line: 4,
            value: "three".to_string(),
        })
    );
    assert!(matches!(
        parse_gesture_line("gesture swipe up 0 ls", 4),
        Err(ParseError::InvalidFingerCount { .. })
    ));
    assert_eq!(
        parse_gesture_line("gesture swipe up 3 xdotool key", 9),
        Err(ParseError::MissingKeyCombo { line: 9 })
    );
}

#[test]
fn test_parse_error_display() {
    let error = ParseError::UnknownGesture {
        line: 3,
        phrase: "gesture hold on".to_string(),
    };
    assert_eq!(error.to_string(), "Unknown gesture 'gesture hold on' on line 3");
}

#[test]
fn test_desktop_action_empty_quotes_use_last_token() {
    let line = "gesture swipe up 3 qdbus \"\" invokeShortcut \"Expose\"";
    let binding = parse_gesture_line(line, 1).unwrap();
    assert_eq!(binding.payload(), "Expose");
}

#[test]
fn test_desktop_action_empty_first_quote_uses_last_token() {
    let line = "gesture swipe up 3 qdbus \"\" \"A\" \"B\"";
    let binding = parse_gesture_line(line, 1).unwrap();
    assert_eq!(binding.payload(), "B");
}
