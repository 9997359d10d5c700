//! Shared utilities for DVF crates.
//!
//! This crate provides common utilities used across the DVF workspace,
//! including Polars value helpers and date conversions.

pub mod dates;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use crate::dates::{date_from_days, days_from_date, iso_date, iso_datetime_utc};
pub use crate::polars::{any_to_string, format_numeric, parse_f64, parse_i64};
