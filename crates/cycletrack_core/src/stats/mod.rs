//! Derived statistics over the period history.
//!
//! # Responsibility
//! - Compute cycle-length figures from an ordered record slice.
//!
//! # Invariants
//! - Statistics read stored order as-is; they never sort.
//! - Fewer than two records always yields absence, never zero.

pub mod cycle;
