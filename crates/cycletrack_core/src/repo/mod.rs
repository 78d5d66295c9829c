//! History persistence contracts and the text-file implementation.
//!
//! # Responsibility
//! - Define whole-history load/save contracts for period records.
//! - Keep file format details inside the persistence boundary.
//!
//! # Invariants
//! - Load is all-or-nothing; malformed content never yields a partial history.
//! - Save replaces the complete file content atomically.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod history_repo;

pub use history_repo::{HistoryRepository, TextFileHistoryRepository};

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Persistence error for history load/save operations.
#[derive(Debug)]
pub enum HistoryError {
    /// Underlying filesystem failure.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Stored content does not match the two-dates-per-line format.
    MalformedRecord { line: usize, message: String },
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "history file `{}`: {source}", path.display())
            }
            Self::MalformedRecord { line, message } => {
                write!(f, "malformed period record at line {line}: {message}")
            }
        }
    }
}

impl Error for HistoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MalformedRecord { .. } => None,
        }
    }
}
