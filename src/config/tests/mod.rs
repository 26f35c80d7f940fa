//! Config engine tests
//!
//! Contains test suites for the file-backed engine:
//! - ConfigManager operations (read, write, repair, upsert, delete, defaults)
//! - ConfigTransaction read-modify-write cycles
//! - ConfigWatcher change notification

#[cfg(test)]
mod transaction_tests;
