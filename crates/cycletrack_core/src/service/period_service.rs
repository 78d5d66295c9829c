//! Period history use-case service.
//!
//! # Responsibility
//! - Hold the in-memory history, loaded once at construction.
//! - Provide the add/edit/list/statistics surface used by the UI layer.
//! - Persist the full history after every mutation.
//!
//! # Invariants
//! - The history keeps insertion order; no operation ever sorts it.
//! - After every call, success or failure, the in-memory history matches
//!   the persisted file content (failed saves roll the mutation back).

use crate::model::period::{format_period_date, InvalidDateError, PeriodRecord};
use crate::repo::{HistoryError, HistoryRepository};
use crate::stats::cycle::{average_cycle_length, predict_next_start};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, PeriodServiceError>;

/// Service error for period history use-cases.
#[derive(Debug)]
pub enum PeriodServiceError {
    /// A date text failed strict `YYYY-MM-DD` parsing.
    InvalidDate(InvalidDateError),
    /// Edit requested for a position that does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// Persistence-layer failure.
    History(HistoryError),
}

impl Display for PeriodServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "no period at index {index}; history holds {len} records")
            }
            Self::History(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PeriodServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
            Self::History(err) => Some(err),
        }
    }
}

impl From<InvalidDateError> for PeriodServiceError {
    fn from(value: InvalidDateError) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<HistoryError> for PeriodServiceError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

/// Use-case facade over whole-history persistence.
#[derive(Debug)]
pub struct PeriodService<R: HistoryRepository> {
    repo: R,
    periods: Vec<PeriodRecord>,
}

impl<R: HistoryRepository> PeriodService<R> {
    /// Opens the service by loading the stored history once.
    ///
    /// # Errors
    /// Fails when stored content is malformed or unreadable. A missing file
    /// is an empty history, not an error.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let periods = repo.load_history()?;
        info!(
            "event=service_open module=service status=ok records={}",
            periods.len()
        );
        Ok(Self { repo, periods })
    }

    /// Read-only view of the history in stored order.
    pub fn records(&self) -> &[PeriodRecord] {
        &self.periods
    }

    /// Parses both dates and appends a new record at the end of the history.
    ///
    /// Entry order is kept as-is; out-of-order entry is accepted and never
    /// reordered.
    ///
    /// # Errors
    /// - `InvalidDate` when either text fails parsing; nothing changes.
    /// - `History` when persisting fails; the appended record is rolled back.
    pub fn add_period(&mut self, start_text: &str, end_text: &str) -> ServiceResult<()> {
        let record = PeriodRecord::from_text(start_text, end_text)?;

        self.periods.push(record);
        if let Err(err) = self.repo.save_history(&self.periods) {
            self.periods.pop();
            return Err(err.into());
        }

        info!(
            "event=period_add module=service status=ok records={}",
            self.periods.len()
        );
        Ok(())
    }

    /// Replaces the record at a 0-based position in place.
    ///
    /// Other records keep their positions and values.
    ///
    /// # Errors
    /// - `InvalidDate` when either text fails parsing; nothing changes.
    /// - `IndexOutOfRange` when no record exists at `index`.
    /// - `History` when persisting fails; the previous record is restored.
    pub fn edit_period(
        &mut self,
        index: usize,
        start_text: &str,
        end_text: &str,
    ) -> ServiceResult<()> {
        let record = PeriodRecord::from_text(start_text, end_text)?;

        let len = self.periods.len();
        let Some(slot) = self.periods.get_mut(index) else {
            return Err(PeriodServiceError::IndexOutOfRange { index, len });
        };

        let previous = *slot;
        *slot = record;
        if let Err(err) = self.repo.save_history(&self.periods) {
            self.periods[index] = previous;
            return Err(err.into());
        }

        info!("event=period_edit module=service status=ok index={index}");
        Ok(())
    }

    /// Average start-to-start gap in days over the stored order.
    ///
    /// Returns `None` for fewer than two records.
    pub fn average_cycle_length(&self) -> Option<f64> {
        average_cycle_length(&self.periods)
    }

    /// Predicted start date of the next period.
    ///
    /// Returns `None` for fewer than two records.
    pub fn predict_next_period(&self) -> Option<NaiveDate> {
        predict_next_start(&self.periods)
    }

    /// Numbered display lines, one per record, rendered lazily.
    pub fn display_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.periods.iter().enumerate().map(|(index, record)| {
            format!(
                "{}. Start: {}, End: {}",
                index + 1,
                format_period_date(record.start),
                format_period_date(record.end)
            )
        })
    }
}
