//! Report data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use printfarm_shared::types::JournalEntryId;

use crate::accounts::{AccountCode, AccountType, GlAccount};
use crate::ledger::entry::Side;

/// One account's balances in a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: AccountCode,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Raw sum of debit line amounts.
    pub debit_total: Decimal,
    /// Raw sum of credit line amounts.
    pub credit_total: Decimal,
    /// Net balance when it falls on the debit side.
    pub debit_balance: Decimal,
    /// Net balance when it falls on the credit side.
    pub credit_balance: Decimal,
}

/// Trial balance totals and the double-entry cross-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of all debit balances.
    pub total_debit: Decimal,
    /// Sum of all credit balances.
    pub total_credit: Decimal,
    /// Whether total debits equal total credits.
    ///
    /// Computed from the reported balances, independently of the
    /// assumption that every entry balanced at post time, so a historical
    /// anomaly surfaces here instead of being hidden.
    pub is_balanced: bool,
}

/// Trial balance report as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Balances include entries posted on or before this date.
    pub as_of: NaiveDate,
    /// Per-account rows, sorted by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals and the balance cross-check.
    pub totals: TrialBalanceTotals,
}

impl TrialBalanceReport {
    /// Returns the row for an account code, if present.
    #[must_use]
    pub fn row(&self, code: AccountCode) -> Option<&TrialBalanceRow> {
        self.rows.iter().find(|r| r.account_code == code)
    }
}

/// A single posted line against one account, as recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFact {
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
    /// The entry's description.
    pub description: String,
    /// Debit or credit.
    pub side: Side,
    /// Line amount.
    pub amount: Decimal,
}

/// One row of an account ledger, with the running balance after the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
    /// The entry's description.
    pub description: String,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Balance after this line, per the account's normal-balance
    /// convention.
    pub running_balance: Decimal,
}

/// An account's ledger over a date range.
///
/// Rows are produced lazily and the sequence is restartable: every call to
/// [`AccountLedger::rows`] starts over from the opening balance.
#[derive(Debug, Clone)]
pub struct AccountLedger {
    /// The account being reported.
    pub account: GlAccount,
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
    /// Balance immediately prior to the range.
    pub opening_balance: Decimal,
    facts: Vec<LedgerFact>,
}

impl AccountLedger {
    /// Creates an account ledger from unordered line facts.
    ///
    /// Facts are ordered by `(posted_at, entry_id)` ascending, so ties on
    /// the timestamp break deterministically.
    #[must_use]
    pub fn new(
        account: GlAccount,
        from: NaiveDate,
        to: NaiveDate,
        opening_balance: Decimal,
        mut facts: Vec<LedgerFact>,
    ) -> Self {
        facts.sort_by(|a, b| {
            a.posted_at
                .cmp(&b.posted_at)
                .then_with(|| a.entry_id.cmp(&b.entry_id))
        });
        Self {
            account,
            from,
            to,
            opening_balance,
            facts,
        }
    }

    /// Returns a lazy iterator over ledger rows with running balances.
    #[must_use]
    pub fn rows(&self) -> LedgerRows<'_> {
        LedgerRows {
            normal_balance: self.account.normal_balance(),
            facts: self.facts.iter(),
            balance: self.opening_balance,
        }
    }

    /// Returns the balance after the last row in the range.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.rows()
            .last()
            .map_or(self.opening_balance, |row| row.running_balance)
    }

    /// Returns the number of rows in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if the range holds no activity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Lazy row iterator over an [`AccountLedger`].
pub struct LedgerRows<'a> {
    normal_balance: crate::accounts::NormalBalance,
    facts: std::slice::Iter<'a, LedgerFact>,
    balance: Decimal,
}

impl Iterator for LedgerRows<'_> {
    type Item = LedgerRow;

    fn next(&mut self) -> Option<Self::Item> {
        let fact = self.facts.next()?;
        let (debit, credit) = match fact.side {
            Side::Debit => (fact.amount, Decimal::ZERO),
            Side::Credit => (Decimal::ZERO, fact.amount),
        };
        self.balance += self.normal_balance.balance_change(debit, credit);
        Some(LedgerRow {
            entry_id: fact.entry_id,
            posted_at: fact.posted_at,
            description: fact.description.clone(),
            debit,
            credit,
            running_balance: self.balance,
        })
    }
}
