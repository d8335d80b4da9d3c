//! Account registry error types.

use thiserror::Error;

use super::account::{AccountCode, AccountType};

/// Errors that can occur in the account registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Account code is outside the four-digit convention.
    #[error("Invalid account code: {0} (expected a four-digit code between 1000 and 5999)")]
    InvalidCode(u16),

    /// Account code's leading digit does not match the account type.
    #[error("Account code {code} does not match account type {account_type}")]
    CodeTypeMismatch {
        /// The offending code.
        code: AccountCode,
        /// The declared account type.
        account_type: AccountType,
    },

    /// An account with this code already exists.
    #[error("Account {0} already exists")]
    DuplicateCode(AccountCode),

    /// No account exists with this code.
    #[error("Account {0} does not exist")]
    Unknown(AccountCode),

    /// Account is referenced by journal lines and cannot be removed.
    #[error("Account {0} is referenced by journal lines and cannot be removed")]
    Referenced(AccountCode),
}

impl AccountError {
    /// Returns the error code for machine-readable responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCode(_) => "INVALID_ACCOUNT_CODE",
            Self::CodeTypeMismatch { .. } => "ACCOUNT_CODE_TYPE_MISMATCH",
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::Unknown(_) => "UNKNOWN_ACCOUNT",
            Self::Referenced(_) => "ACCOUNT_REFERENCED",
        }
    }
}
