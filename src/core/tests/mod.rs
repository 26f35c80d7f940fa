//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Line classification and display decoding
//! - Document repair, key removal and ordering
//! - Key-combo translation
//! - Type tests (Gesture labels, GestureBinding reconstruction)

#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod types_tests;
