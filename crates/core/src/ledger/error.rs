//! Ledger error types for validation and posting failures.
//!
//! All validation failures are detected before any write and returned
//! synchronously; none trigger partial commits. Transient infrastructure
//! failures are a distinct kind so callers can retry with the same posting
//! key.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use printfarm_shared::types::FiscalPeriodId;

use crate::accounts::AccountCode;

use super::entry::PostingKey;

/// Errors that can occur during posting and ledger queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A referenced account code does not exist in the registry.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountCode),

    /// Entry shape is invalid (too few lines, single-sided, or a
    /// non-positive amount).
    #[error("Malformed entry: {reason}")]
    MalformedEntry {
        /// Which shape rule failed.
        reason: String,
    },

    /// Entry does not balance (debits != credits).
    #[error("Unbalanced entry: debits ({debits}) != credits ({credits})")]
    UnbalancedEntry {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    // ========== Period Errors ==========
    /// No fiscal period covers the posting date.
    #[error("No fiscal period found for date {0}")]
    PeriodNotFound(NaiveDate),

    /// The target fiscal period is closed.
    #[error("Fiscal period {period_id} is closed, no posting allowed")]
    PeriodClosed {
        /// The closed period.
        period_id: FiscalPeriodId,
    },

    // ========== Idempotency Errors ==========
    /// An entry with this posting key was already committed.
    #[error("Duplicate posting for key {key}")]
    DuplicatePosting {
        /// The deduplication key that was already used.
        key: PostingKey,
    },

    // ========== Collaborator Errors ==========
    /// Reopen was refused by the authorization collaborator.
    ///
    /// Never constructed by the engine itself; the authz layer raises it
    /// before the call reaches the ledger.
    #[error("Reopen not authorized for this actor")]
    ReopenNotAuthorized,

    /// The physical inventory collaborator failed.
    #[error("Inventory valuation unavailable: {0}")]
    Inventory(String),

    // ========== Infrastructure Errors ==========
    /// Transient storage failure; retry with the same posting key.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Creates a malformed-entry error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            reason: reason.into(),
        }
    }

    /// Returns the error code for machine-readable responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::MalformedEntry { .. } => "MALFORMED_ENTRY",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::DuplicatePosting { .. } => "DUPLICATE_POSTING",
            Self::ReopenNotAuthorized => "REOPEN_NOT_AUTHORIZED",
            Self::Inventory(_) => "INVENTORY_UNAVAILABLE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if a retry with the same posting key may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Inventory(_) | Self::Storage(_))
    }
}

impl From<LedgerError> for printfarm_shared::AppError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::UnknownAccount(_) | LedgerError::PeriodNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::MalformedEntry { .. } | LedgerError::UnbalancedEntry { .. } => {
                Self::Validation(err.to_string())
            }
            LedgerError::PeriodClosed { .. } => Self::BusinessRule(err.to_string()),
            LedgerError::DuplicatePosting { .. } => Self::Conflict(err.to_string()),
            LedgerError::ReopenNotAuthorized => Self::Forbidden(err.to_string()),
            LedgerError::Inventory(_) => Self::ExternalService(err.to_string()),
            LedgerError::Storage(_) => Self::Internal(err.to_string()),
        }
    }
}
