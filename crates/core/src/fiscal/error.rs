//! Fiscal period error types.

use chrono::NaiveDate;
use thiserror::Error;

use printfarm_shared::types::{FiscalPeriodId, JournalEntryId};

use super::period::PeriodStatus;

/// Errors that can occur during period management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    NotFound(FiscalPeriodId),

    /// Invalid status transition (e.g. closing an already-closed period).
    #[error("Invalid period status transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current status.
        from: PeriodStatus,
        /// Target status.
        to: PeriodStatus,
    },

    /// Start date must be on or before end date.
    #[error("Start date must be on or before end date")]
    InvalidDateRange,

    /// Period overlaps with an existing period.
    #[error("Period overlaps with existing period: {0}")]
    Overlapping(String),

    /// Period is not contiguous with the previous period.
    #[error("Period must start on {expected_start}, got {actual_start}")]
    NotContiguous {
        /// The day after the previous period's end.
        expected_start: NaiveDate,
        /// The start date that was supplied.
        actual_start: NaiveDate,
    },

    /// Closing was refused because the period has no entries (policy).
    #[error("Fiscal period {0} has no journal entries")]
    HasNoEntries(FiscalPeriodId),

    /// An entry in the period does not balance.
    ///
    /// Entries are balanced by construction; this is the defensive
    /// consistency assertion run at close time.
    #[error("Ledger inconsistency: entry {entry_id} does not balance")]
    LedgerInconsistency {
        /// The offending entry.
        entry_id: JournalEntryId,
    },
}

impl PeriodError {
    /// Returns the error code for machine-readable responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PERIOD_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_PERIOD_TRANSITION",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::Overlapping(_) => "PERIOD_OVERLAP",
            Self::NotContiguous { .. } => "PERIOD_NOT_CONTIGUOUS",
            Self::HasNoEntries(_) => "PERIOD_HAS_NO_ENTRIES",
            Self::LedgerInconsistency { .. } => "LEDGER_INCONSISTENCY",
        }
    }
}

impl From<PeriodError> for printfarm_shared::AppError {
    fn from(err: PeriodError) -> Self {
        match &err {
            PeriodError::NotFound(_) => Self::NotFound(err.to_string()),
            PeriodError::InvalidDateRange
            | PeriodError::Overlapping(_)
            | PeriodError::NotContiguous { .. } => Self::Validation(err.to_string()),
            PeriodError::InvalidTransition { .. } | PeriodError::HasNoEntries(_) => {
                Self::BusinessRule(err.to_string())
            }
            PeriodError::LedgerInconsistency { .. } => Self::Internal(err.to_string()),
        }
    }
}
