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

//! src/core/document.rs
//!
//! In-memory view of a config file as an ordered list of raw lines
//!
//! Every transformation the config engine performs (repair, key removal,
//! append, display decoding) is a pure function over [`ConfigDocument`].
//! Lines keep their `\n` terminator so that serialising is a plain
//! concatenation and untouched lines round-trip byte for byte.

use regex::Regex;
use serde::Serialize;
use std::{cmp::Ordering, sync::LazyLock};

use crate::core::{
    parser::{classify_line, parse_gesture_line, ConfigLine, MalformedReason, GESTURE_KEYWORD},
    types::GestureBinding,
};
use crate::core::parser::ParseError;

/// Runs of spaces and tabs
#[allow(clippy::expect_used)]
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("blank-run pattern should compile"));

/// Ordered raw lines of a config file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigDocument {
    lines: Vec<String>,
}

/// A line removed by [`ConfigDocument::repair`]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DroppedLine {
    /// 1-based line number in the document before repair
    pub line_number: usize,
    /// Line text without its terminator
    pub text: String,
    /// Human-readable reason
    pub reason: String,
}

/// Outcome of a repair pass
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RepairReport {
    /// Number of lines kept
    pub kept: usize,
    /// Lines that failed the grammar, in document order
    pub dropped: Vec<DroppedLine>,
}

impl RepairReport {
    /// True when repair left the document unchanged
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl ConfigDocument {
    /// Splits text into lines, keeping each `\n` terminator
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact concatenation of all lines
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Keeps only lines that pass the repair grammar
    ///
    /// The result is always an order-preserving subsequence of `self`;
    /// retained lines are copied verbatim.
    pub fn repair(&self) -> (ConfigDocument, RepairReport) {
        let mut kept = Vec::with_capacity(self.lines.len());
        let mut report = RepairReport::default();

        for (index, line) in self.lines.iter().enumerate() {
            match classify_line(line) {
                ConfigLine::Malformed(reason) => report.dropped.push(dropped(index, line, &reason)),
                _ => kept.push(line.clone()),
            }
        }

        report.kept = kept.len();
        (ConfigDocument { lines: kept }, report)
    }

    /// Decodes every line that starts with `gesture`, in document order
    ///
    /// Fails on the first gesture line that cannot be decoded; the error
    /// carries its 1-based line number.
    pub fn bindings(&self) -> Result<Vec<GestureBinding>, ParseError> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with(GESTURE_KEYWORD))
            .map(|(index, line)| parse_gesture_line(line, index + 1))
            .collect()
    }

    /// Removes every line keyed by `key`, returning how many were removed
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line_has_key(line, key));
        before - self.lines.len()
    }

    /// Appends a line, terminating it and the previous last line with `\n`
    pub fn push_line(&mut self, line: &str) {
        if let Some(last) = self.lines.last_mut() {
            if !last.ends_with('\n') {
                last.push('\n');
            }
        }

        let mut line = line.to_string();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.lines.push(line);
    }

    /// Collapses runs of spaces and tabs in every line
    pub fn normalized(&self) -> ConfigDocument {
        ConfigDocument::from_text(&collapse_whitespace(&self.to_text()))
    }
}

fn dropped(index: usize, line: &str, reason: &MalformedReason) -> DroppedLine {
    DroppedLine {
        line_number: index + 1,
        text: line.trim_end_matches('\n').to_string(),
        reason: reason.to_string(),
    }
}

/// Replaces each run of spaces and/or tabs with a single space
///
/// Token boundaries never move, only delimiter width changes, so this is
/// safe on any input and applying it twice changes nothing.
pub fn collapse_whitespace(text: &str) -> String {
    BLANK_RUN.replace_all(text, " ").into_owned()
}

/// Whether `line` belongs to the binding identified by `key`
///
/// Keys are compared token by token, so `gesture swipe up 3` matches
/// `gesture swipe up 3 xdotool key a` and `gesture   swipe up 3 ...` but
/// never `gesture swipe up 30 ...`.
pub fn line_has_key(line: &str, key: &str) -> bool {
    let mut line_tokens = line.split_whitespace();
    let mut key_tokens = key.split_whitespace().peekable();
    if key_tokens.peek().is_none() {
        return false;
    }
    key_tokens.all(|key_token| line_tokens.next() == Some(key_token))
}

/// Sorts bindings for display
///
/// Ascending by label, then finger count (numerically), payload, canonical
/// key and finally action kind label. The sort is stable, so identical
/// inputs always produce the same order.
pub fn sort_for_display(bindings: &mut [GestureBinding]) {
    bindings.sort_by(display_order);
}

fn display_order(a: &GestureBinding, b: &GestureBinding) -> Ordering {
    a.label()
        .cmp(&b.label())
        .then_with(|| a.finger_count.cmp(&b.finger_count))
        .then_with(|| a.payload().cmp(b.payload()))
        .then_with(|| a.canonical_key().cmp(&b.canonical_key()))
        .then_with(|| a.action_kind().label().cmp(b.action_kind().label()))
}
