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

//! src/core/parser.rs
//!
//! libinput-gestures configuration line parser
//!
//! This module understands the three statement kinds of the config format:
//! - `gesture <type> <direction> <fingers> <action...>`
//! - `device <name>`
//! - `swipe_threshold <integer>`
//!
//! plus comments and blank lines. It offers two views of a line:
//! 1. [`classify_line`]: the strict grammar used when repairing a file.
//!    Every line maps to exactly one [`ConfigLine`] variant.
//! 2. [`parse_gesture_line`]: the lenient decoder used for display. It turns
//!    a `gesture` line into a [`GestureBinding`] or reports why it cannot.
//!
//! Both share the same whitespace tokenizer and the same [`Dispatcher`]
//! classification of the action token, so the index logic lives in one place.
//!
//! # Architecture
//! The `gesture <type> <direction>` head is parsed with nom combinators;
//! the action tail is free-form and handled token by token.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::space1,
    combinator::{eof, peek, value},
    error::{Error as NomError, ErrorKind},
    IResult, Parser,
};
use regex::Regex;
use std::{fmt, sync::LazyLock};
use thiserror::Error;

use crate::core::types::{Direction, Gesture, GestureAction, GestureBinding, GestureType};

/// Keyword that starts a gesture binding
pub const GESTURE_KEYWORD: &str = "gesture";
/// Keyword that pins libinput-gestures to one input device
pub const DEVICE_KEYWORD: &str = "device";
/// Keyword that sets the minimum swipe distance
pub const SWIPE_THRESHOLD_KEYWORD: &str = "swipe_threshold";

/// Index of the action token in a whitespace-split gesture line
const ACTION_INDEX: usize = 4;
/// `gesture swipe up 3 xdotool key <combo>`
const XDOTOOL_KEY_TOKENS: usize = 7;

/// First double-quoted substring, non-greedy
#[allow(clippy::expect_used)]
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)""#).expect("quoted-name pattern should compile"));

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}: expected at least 5 fields, found {found}")]
    TooFewFields { line: usize, found: usize },

    #[error("Unknown gesture '{phrase}' on line {line}")]
    UnknownGesture { line: usize, phrase: String },

    #[error("Invalid finger count '{value}' on line {line}")]
    InvalidFingerCount { line: usize, value: String },

    #[error("Missing key combo after 'xdotool key' on line {line}")]
    MissingKeyCombo { line: usize },
}

/// How a gesture line dispatches its action, decided by the fifth token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dispatcher {
    /// Exactly `xdotool`
    Xdotool,
    /// Any binary whose name contains `qdbus` (`qdbus`, `qdbus-qt5`, `/usr/bin/qdbus6`)
    Qdbus,
    /// Free-form command
    Other,
}

impl Dispatcher {
    pub fn of(token: &str) -> Self {
        if token == "xdotool" {
            Dispatcher::Xdotool
        } else if token.contains("qdbus") {
            Dispatcher::Qdbus
        } else {
            Dispatcher::Other
        }
    }
}

/// Why a line fails the repair grammar
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MalformedReason {
    /// Whitespace-only line
    NoKeyword,
    /// First token is not a recognised keyword
    UnknownKeyword(String),
    /// `device` / `swipe_threshold` without exactly one argument
    WrongArity { keyword: String, found: usize },
    /// `gesture` line too short to carry an action
    TooFewFields(usize),
    /// `gesture <type> <direction>` outside the known vocabulary
    UnknownGesture(String),
    /// Finger count that is not a positive integer
    InvalidFingerCount(String),
    /// `xdotool` used with something other than `key`
    XdotoolNotKey,
    /// `xdotool key` followed by anything but a single combo token
    XdotoolArity(usize),
    /// qdbus line whose last token is not a closing quote
    UnquotedDesktopAction,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::NoKeyword => write!(f, "line has no keyword"),
            MalformedReason::UnknownKeyword(word) => write!(f, "unknown keyword '{}'", word),
            MalformedReason::WrongArity { keyword, found } => write!(
                f,
                "'{}' takes exactly one argument, found {}",
                keyword,
                found.saturating_sub(1)
            ),
            MalformedReason::TooFewFields(found) => {
                write!(f, "gesture needs at least 5 fields, found {}", found)
            }
            MalformedReason::UnknownGesture(phrase) => write!(f, "unknown gesture '{}'", phrase),
            MalformedReason::InvalidFingerCount(value) => {
                write!(f, "finger count '{}' is not a positive integer", value)
            }
            MalformedReason::XdotoolNotKey => write!(f, "only 'xdotool key' is supported"),
            MalformedReason::XdotoolArity(found) => write!(
                f,
                "'xdotool key' needs exactly one key combo ({} fields instead of 7)",
                found
            ),
            MalformedReason::UnquotedDesktopAction => {
                write!(f, "desktop action name is not quoted")
            }
        }
    }
}

/// One config line classified by the repair grammar
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigLine<'a> {
    /// `#` comment or empty line, preserved verbatim
    Comment(&'a str),
    /// Well-formed gesture statement, already tokenized
    Gesture(Vec<&'a str>),
    /// `device <name>`
    Device(&'a str),
    /// `swipe_threshold <value>`
    SwipeThreshold(&'a str),
    /// Anything the grammar rejects
    Malformed(MalformedReason),
}

impl ConfigLine<'_> {
    /// Whether repair keeps this line
    pub fn is_retained(&self) -> bool {
        !matches!(self, ConfigLine::Malformed(_))
    }
}

/// Splits a line the way libinput-gestures does: on runs of spaces and tabs
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Classifies a single line (with or without its `\n` terminator)
///
/// # Example
/// ```
/// use gesture_config_manager::core::parser::{classify_line, ConfigLine, MalformedReason};
///
/// assert!(matches!(classify_line("# comment\n"), ConfigLine::Comment(_)));
/// assert!(matches!(classify_line("device touchpad\n"), ConfigLine::Device("touchpad")));
/// assert_eq!(
///     classify_line("gesture swipe down 3 qdbus org.kde.kglobalaccel /component/kwin invokeShortcut Expose"),
///     ConfigLine::Malformed(MalformedReason::UnquotedDesktopAction),
/// );
/// ```
pub fn classify_line(line: &str) -> ConfigLine<'_> {
    let body = line.strip_suffix('\n').unwrap_or(line);
    if body.is_empty() || body.starts_with('#') {
        return ConfigLine::Comment(body);
    }

    let tokens = tokenize(body);
    let Some(&keyword) = tokens.first() else {
        return ConfigLine::Malformed(MalformedReason::NoKeyword);
    };

    match keyword {
        GESTURE_KEYWORD => classify_gesture(tokens),
        DEVICE_KEYWORD | SWIPE_THRESHOLD_KEYWORD => {
            if tokens.len() != 2 {
                return ConfigLine::Malformed(MalformedReason::WrongArity {
                    keyword: keyword.to_string(),
                    found: tokens.len(),
                });
            }
            if keyword == DEVICE_KEYWORD {
                ConfigLine::Device(tokens[1])
            } else {
                ConfigLine::SwipeThreshold(tokens[1])
            }
        }
        other => ConfigLine::Malformed(MalformedReason::UnknownKeyword(other.to_string())),
    }
}

fn classify_gesture(tokens: Vec<&str>) -> ConfigLine<'_> {
    if tokens.len() <= ACTION_INDEX {
        return ConfigLine::Malformed(MalformedReason::TooFewFields(tokens.len()));
    }
    if let Err(e) = decode_head(&tokens) {
        return ConfigLine::Malformed(e.into());
    }

    match Dispatcher::of(tokens[ACTION_INDEX]) {
        Dispatcher::Xdotool => {
            if tokens.get(ACTION_INDEX + 1) != Some(&"key") {
                ConfigLine::Malformed(MalformedReason::XdotoolNotKey)
            } else if tokens.len() != XDOTOOL_KEY_TOKENS {
                ConfigLine::Malformed(MalformedReason::XdotoolArity(tokens.len()))
            } else {
                ConfigLine::Gesture(tokens)
            }
        }
        Dispatcher::Qdbus => {
            let quoted = tokens.last().is_some_and(|last| last.ends_with('"'));
            if quoted {
                ConfigLine::Gesture(tokens)
            } else {
                ConfigLine::Malformed(MalformedReason::UnquotedDesktopAction)
            }
        }
        Dispatcher::Other => ConfigLine::Gesture(tokens),
    }
}

/// Parse gesture family (`swipe` or `pinch`)
pub fn parse_gesture_type(input: &str) -> IResult<&str, GestureType> {
    alt((
        value(GestureType::Swipe, tag("swipe")),
        value(GestureType::Pinch, tag("pinch")),
    ))
    .parse(input)
}

/// Parse a direction keyword
///
/// Compound directions must come before their prefixes (`left_up` before
/// `left`), otherwise `left` would match first and leave `_up` behind.
pub fn parse_direction(input: &str) -> IResult<&str, Direction> {
    alt((
        value(Direction::LeftUp, tag("left_up")),
        value(Direction::LeftDown, tag("left_down")),
        value(Direction::Left, tag("left")),
        value(Direction::RightUp, tag("right_up")),
        value(Direction::RightDown, tag("right_down")),
        value(Direction::Right, tag("right")),
        value(Direction::Up, tag("up")),
        value(Direction::Down, tag("down")),
        value(Direction::In, tag("in")),
        value(Direction::Out, tag("out")),
        value(Direction::Clockwise, tag("clockwise")),
        value(Direction::Anticlockwise, tag("anticlockwise")),
    ))
    .parse(input)
}

/// Parse the canonical phrase `gesture <type> <direction>`
///
/// The direction must be followed by whitespace or the end of input and
/// must belong to the gesture family (`pinch up` is rejected).
pub fn parse_gesture_phrase(input: &str) -> IResult<&str, Gesture> {
    let (input, _) = (tag(GESTURE_KEYWORD), space1).parse(input)?;
    let (input, gesture_type) = parse_gesture_type(input)?;
    let (input, _) = space1(input)?;
    let (input, direction) = parse_direction(input)?;
    let (input, _) = peek(alt((space1, eof))).parse(input)?;

    match Gesture::new(gesture_type, direction) {
        Some(gesture) => Ok((input, gesture)),
        None => Err(nom::Err::Error(NomError::new(input, ErrorKind::Verify))),
    }
}

/// Decode one `gesture` line for display
///
/// # Arguments
/// * `line` - The raw line, with or without its terminator
/// * `line_num` - 1-based line number used in errors
///
/// # Action decoding
/// - `xdotool key <combo>` → keyboard shortcut `<combo>`
/// - dispatcher containing `qdbus` → desktop action named by the first
///   double-quoted substring, or the last token with quotes removed
/// - anything else → command made of every token from the fifth on
pub fn parse_gesture_line(line: &str, line_num: usize) -> Result<GestureBinding, ParseError> {
    let tokens = tokenize(line);
    if tokens.len() <= ACTION_INDEX {
        return Err(ParseError::TooFewFields {
            line: line_num,
            found: tokens.len(),
        });
    }

    let (gesture, finger_count) = decode_head(&tokens).map_err(|e| e.at_line(line_num))?;

    let action = decode_action(line, &tokens, line_num)?;

    Ok(GestureBinding {
        gesture,
        finger_count,
        action,
        invocation: tokens[ACTION_INDEX..].join(" "),
    })
}

/// Why the `gesture <type> <direction> <fingers>` head failed to decode
#[derive(Debug)]
enum HeadError {
    UnknownGesture(String),
    InvalidFingerCount(String),
}

impl HeadError {
    fn at_line(self, line: usize) -> ParseError {
        match self {
            HeadError::UnknownGesture(phrase) => ParseError::UnknownGesture { line, phrase },
            HeadError::InvalidFingerCount(value) => ParseError::InvalidFingerCount { line, value },
        }
    }
}

impl From<HeadError> for MalformedReason {
    fn from(e: HeadError) -> Self {
        match e {
            HeadError::UnknownGesture(phrase) => MalformedReason::UnknownGesture(phrase),
            HeadError::InvalidFingerCount(value) => MalformedReason::InvalidFingerCount(value),
        }
    }
}

/// Decodes the first four tokens for both repair and display
///
/// Callers guarantee at least four tokens.
fn decode_head(tokens: &[&str]) -> Result<(Gesture, u32), HeadError> {
    let phrase = tokens[..3].join(" ");
    let gesture = match parse_gesture_phrase(&phrase) {
        Ok(("", gesture)) => gesture,
        _ => return Err(HeadError::UnknownGesture(phrase)),
    };

    let finger_count = tokens[3]
        .parse::<u32>()
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| HeadError::InvalidFingerCount(tokens[3].to_string()))?;

    Ok((gesture, finger_count))
}

fn decode_action(line: &str, tokens: &[&str], line_num: usize) -> Result<GestureAction, ParseError> {
    let dispatcher = Dispatcher::of(tokens[ACTION_INDEX]);
    match dispatcher {
        Dispatcher::Xdotool if tokens.get(ACTION_INDEX + 1) == Some(&"key") => tokens
            .get(ACTION_INDEX + 2)
            .map(|combo| GestureAction::KeyboardShortcut(combo.to_string()))
            .ok_or(ParseError::MissingKeyCombo { line: line_num }),
        Dispatcher::Qdbus => Ok(GestureAction::DesktopAction(desktop_action_name(line, tokens))),
        _ => Ok(GestureAction::Command(tokens[ACTION_INDEX..].join(" "))),
    }
}

/// Extracts the KWin shortcut name from a qdbus invocation
///
/// Takes the first double-quoted substring of the line. A line quoting
/// several strings yields the first one even when the shortcut name is a
/// later argument; that ambiguity is accepted for compatibility with configs
/// written by other tools. When there is no quoted substring, or the first
/// one is empty (`""`), the last token is used with its quote characters
/// removed, so `qdbus "" "A" "B"` names `B`.
pub fn desktop_action_name(line: &str, tokens: &[&str]) -> String {
    QUOTED
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            tokens
                .last()
                .map(|last| last.replace('"', ""))
                .unwrap_or_default()
        })
}
