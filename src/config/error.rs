use std::path::PathBuf;
use thiserror::Error;

use crate::core::{ParseError, ValidationError};

/// Errors that can occur during configuration management.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path cannot be used (no file name, bad encoding).
    #[error("Invalid config path: {0}")]
    InvalidPath(PathBuf),
    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// A gesture line could not be decoded for display.
    #[error("Config file has malformed gesture lines: {0}")]
    Parse(#[from] ParseError),
    /// Edit request rejected before touching the file.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),
    /// File watcher could not be set up or stopped delivering events.
    #[error("File watch failed: {0}")]
    Watch(String),
    /// qdbus is missing or returned an error.
    #[error("Desktop action lookup failed: {0}")]
    Desktop(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
