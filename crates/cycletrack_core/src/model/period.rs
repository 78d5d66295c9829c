//! Period record domain model and date codec.
//!
//! # Responsibility
//! - Define the canonical start/end record tracked for each period.
//! - Own strict `YYYY-MM-DD` parsing and formatting for every text boundary.
//!
//! # Invariants
//! - Dates are calendar days with no time component.
//! - `end` is expected, but never enforced, to be on or after `start`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Textual date form shared by storage, user input and rendering.
pub const PERIOD_DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date shape regex"));

/// Error for date text that cannot become a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidDateError {
    /// Input does not have the `YYYY-MM-DD` shape.
    Shape { input: String },
    /// Shape is right but the value is not a real calendar date.
    Calendar { input: String },
}

impl Display for InvalidDateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape { input } => write!(f, "date `{input}` does not match YYYY-MM-DD"),
            Self::Calendar { input } => write!(f, "date `{input}` is not a real calendar date"),
        }
    }
}

impl Error for InvalidDateError {}

/// One recorded menstrual period.
///
/// Records carry no identity of their own; the history addresses them by
/// position in stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period. Expected on or after `start`, never enforced.
    pub end: NaiveDate,
}

impl PeriodRecord {
    /// Creates a record from already-parsed dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses a record from two `YYYY-MM-DD` texts.
    ///
    /// # Errors
    /// Returns the first [`InvalidDateError`] encountered, start before end.
    pub fn from_text(start: &str, end: &str) -> Result<Self, InvalidDateError> {
        Ok(Self {
            start: parse_period_date(start)?,
            end: parse_period_date(end)?,
        })
    }
}

/// Parses one strict `YYYY-MM-DD` date.
///
/// No trimming, no alternate separators: input must match the shape exactly.
///
/// # Errors
/// - [`InvalidDateError::Shape`] when the text is not shaped `YYYY-MM-DD`.
/// - [`InvalidDateError::Calendar`] when the shape is right but the day does
///   not exist (for example `2024-13-40`).
pub fn parse_period_date(input: &str) -> Result<NaiveDate, InvalidDateError> {
    if !DATE_SHAPE_RE.is_match(input) {
        return Err(InvalidDateError::Shape {
            input: input.to_string(),
        });
    }
    NaiveDate::parse_from_str(input, PERIOD_DATE_FORMAT).map_err(|_| InvalidDateError::Calendar {
        input: input.to_string(),
    })
}

/// Formats one date in the canonical `YYYY-MM-DD` form.
pub fn format_period_date(date: NaiveDate) -> String {
    date.format(PERIOD_DATE_FORMAT).to_string()
}
