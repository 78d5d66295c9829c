//! Core domain logic for CycleTrack.
//! This crate is the single source of truth for period history invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::period::{
    format_period_date, parse_period_date, InvalidDateError, PeriodRecord, PERIOD_DATE_FORMAT,
};
pub use repo::{HistoryError, HistoryRepository, HistoryResult, TextFileHistoryRepository};
pub use service::period_service::{PeriodService, PeriodServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
