//! Domain model for recorded periods.
//!
//! # Responsibility
//! - Define the canonical record shape shared by persistence and statistics.
//! - Keep every date/text conversion behind one strict codec.
//!
//! # Invariants
//! - All date text uses the `YYYY-MM-DD` form, at every boundary.

pub mod period;
