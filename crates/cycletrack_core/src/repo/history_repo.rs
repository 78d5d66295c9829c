//! Period history repository contract and text-file implementation.
//!
//! # Responsibility
//! - Load and rewrite the newline-delimited `start,end` history file.
//! - Report malformed stored content with its 1-based line number.
//!
//! # Invariants
//! - A missing file loads as an empty history, not an error.
//! - File order is history order; neither path sorts.
//! - Saves go through a sibling temp file plus rename, so an interrupted
//!   write leaves the previous file intact.

use crate::model::period::{format_period_date, parse_period_date, PeriodRecord};
use crate::repo::{HistoryError, HistoryResult};
use log::{error, info};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const RECORD_SEPARATOR: char = ',';

/// Repository interface for whole-history persistence.
///
/// The history is small enough that every operation moves the complete
/// ordered sequence; there is no record-level access.
pub trait HistoryRepository {
    /// Loads the full ordered history from storage.
    fn load_history(&self) -> HistoryResult<Vec<PeriodRecord>>;
    /// Rewrites storage with the given history, replacing prior content.
    fn save_history(&self, records: &[PeriodRecord]) -> HistoryResult<()>;
}

/// Plain-text file repository, one `start,end` line per record.
#[derive(Debug)]
pub struct TextFileHistoryRepository {
    path: PathBuf,
}

impl TextFileHistoryRepository {
    /// Creates a repository over the given history file path.
    ///
    /// The file does not have to exist yet; it appears on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from("history"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_replacing(&self, records: &[PeriodRecord]) -> HistoryResult<()> {
        let mut content = String::new();
        for record in records {
            content.push_str(&format_history_line(record));
            content.push('\n');
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|source| HistoryError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HistoryRepository for TextFileHistoryRepository {
    fn load_history(&self) -> HistoryResult<Vec<PeriodRecord>> {
        let started_at = Instant::now();
        info!(
            "event=history_load module=repo status=start path={}",
            self.path.display()
        );

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                info!(
                    "event=history_load module=repo status=ok records=0 missing_file=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                let err = HistoryError::Io {
                    path: self.path.clone(),
                    source,
                };
                error!(
                    "event=history_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        match parse_history(&content) {
            Ok(records) => {
                info!(
                    "event=history_load module=repo status=ok records={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=history_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save_history(&self, records: &[PeriodRecord]) -> HistoryResult<()> {
        let started_at = Instant::now();
        info!(
            "event=history_save module=repo status=start records={} path={}",
            records.len(),
            self.path.display()
        );

        match self.write_replacing(records) {
            Ok(()) => {
                info!(
                    "event=history_save module=repo status=ok records={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=history_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn parse_history(content: &str) -> HistoryResult<Vec<PeriodRecord>> {
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        records.push(parse_history_line(line, index + 1)?);
    }
    Ok(records)
}

/// Parses one stored line into a record.
///
/// The line is trimmed of surrounding whitespace; the two date tokens are
/// not, so `2024-01-01, 2024-01-05` is malformed.
///
/// # Errors
/// Returns [`HistoryError::MalformedRecord`] when the line does not split
/// into exactly two comma-separated tokens, or when either token is not a
/// strict `YYYY-MM-DD` calendar date.
pub fn parse_history_line(line: &str, line_number: usize) -> HistoryResult<PeriodRecord> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split(RECORD_SEPARATOR);
    let (Some(start_text), Some(end_text), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(HistoryError::MalformedRecord {
            line: line_number,
            message: format!("expected exactly two comma-separated dates, got `{trimmed}`"),
        });
    };

    let start = parse_period_date(start_text).map_err(|err| HistoryError::MalformedRecord {
        line: line_number,
        message: err.to_string(),
    })?;
    let end = parse_period_date(end_text).map_err(|err| HistoryError::MalformedRecord {
        line: line_number,
        message: err.to_string(),
    })?;

    Ok(PeriodRecord::new(start, end))
}

/// Formats one record as a stored `start,end` line, without the newline.
pub fn format_history_line(record: &PeriodRecord) -> String {
    format!(
        "{}{RECORD_SEPARATOR}{}",
        format_period_date(record.start),
        format_period_date(record.end)
    )
}
