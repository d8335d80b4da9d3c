//! GL account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AccountError;

/// High-level account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (cash, inventory, receivables).
    Asset,
    /// Liability account (payables).
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account (COGS, shipping, scrap).
    Expense,
}

impl AccountType {
    /// Returns the side on which this account type naturally accumulates
    /// value.
    ///
    /// The normal balance is always derived from the type, never stored, so
    /// the two can never diverge.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns the leading code digit reserved for this account type.
    #[must_use]
    pub const fn code_prefix(self) -> u16 {
        match self {
            Self::Asset => 1,
            Self::Liability => 2,
            Self::Equity => 3,
            Self::Revenue => 4,
            Self::Expense => 5,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// The side on which an account naturally accumulates value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Calculates the signed balance change for a pair of debit/credit
    /// amounts.
    ///
    /// - Debit-normal: balance += debit - credit
    /// - Credit-normal: balance += credit - debit
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A validated four-digit GL account code.
///
/// The leading digit encodes the account type: 1xxx asset, 2xxx liability,
/// 3xxx equity, 4xxx revenue, 5xxx expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCode(u16);

impl AccountCode {
    /// Creates a new account code, validating the four-digit convention.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCode` for codes outside 1000..=5999.
    pub fn new(code: u16) -> Result<Self, AccountError> {
        if (1000..=5999).contains(&code) {
            Ok(Self(code))
        } else {
            Err(AccountError::InvalidCode(code))
        }
    }

    /// Creates a code for a chart constant known to be in range.
    pub(crate) const fn known(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns the account type implied by the leading digit.
    #[must_use]
    pub const fn implied_type(self) -> AccountType {
        match self.0 / 1000 {
            1 => AccountType::Asset,
            2 => AccountType::Liability,
            3 => AccountType::Equity,
            4 => AccountType::Revenue,
            _ => AccountType::Expense,
        }
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A general-ledger account.
///
/// Accounts are created at seed time and immutable afterwards except for an
/// administrative rename. The normal balance is derived from the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    /// Unique four-digit account code.
    pub code: AccountCode,
    /// Human-readable account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
}

impl GlAccount {
    /// Creates a new account, validating that the code's leading digit
    /// matches the declared type.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::CodeTypeMismatch` when the leading digit
    /// disagrees with the type.
    pub fn new(
        code: AccountCode,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, AccountError> {
        if code.implied_type() != account_type {
            return Err(AccountError::CodeTypeMismatch { code, account_type });
        }
        Ok(Self {
            code,
            name: name.into(),
            account_type,
        })
    }

    /// Returns the account's normal balance side.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }
}
