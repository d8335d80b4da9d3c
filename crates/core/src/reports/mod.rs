//! Trial balance and account ledger computation.
//!
//! Pure report logic: the store aggregates line facts and hands them to
//! this module, which nets balances against each account's normal side and
//! derives running balances.

pub mod service;
pub mod types;

pub use service::{AccountActivity, build_trial_balance, trial_balance_row};
pub use types::{
    AccountLedger, LedgerFact, LedgerRow, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
