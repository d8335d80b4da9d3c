//! Fiscal period management.
//!
//! This module implements:
//! - The two-state period machine (Open/Closed) with transition functions
//!   as the only mutation path
//! - Calendar rules: date ranges, overlap, contiguity, monthly generation
//! - Error types for period operations

pub mod calendar;
pub mod error;
pub mod period;

pub use calendar::{
    date_ranges_overlap, generate_monthly_periods, validate_date_range, validate_insertion,
};
pub use error::PeriodError;
pub use period::{FiscalPeriod, PeriodStatus};
