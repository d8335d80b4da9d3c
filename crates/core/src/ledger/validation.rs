//! Business rule validation for entry drafts.
//!
//! Validation runs in a fixed order and short-circuits on the first
//! failure: unknown accounts, then entry shape, then balance.

use rust_decimal::Decimal;

use crate::accounts::AccountCode;

use super::entry::Side;
use super::error::LedgerError;
use super::types::EntryDraft;

/// Validates a draft against the posting rules.
///
/// `account_exists` is injected so the pure validation logic stays free of
/// any registry/storage dependency.
///
/// Order, first failure wins:
/// 1. Every referenced account code exists -> `UnknownAccount`
/// 2. At least two lines, both sides present, every amount positive
///    -> `MalformedEntry`
/// 3. Debits equal credits exactly -> `UnbalancedEntry`
///
/// # Errors
///
/// Returns the first `LedgerError` encountered in the order above.
pub fn validate_draft<F>(draft: &EntryDraft, account_exists: F) -> Result<(), LedgerError>
where
    F: Fn(AccountCode) -> bool,
{
    // 1. All referenced accounts must exist.
    for line in &draft.lines {
        if !account_exists(line.account_code) {
            return Err(LedgerError::UnknownAccount(line.account_code));
        }
    }

    // 2. Shape: at least two lines, one per side, positive amounts.
    if draft.lines.len() < 2 {
        return Err(LedgerError::malformed("entry must have at least 2 lines"));
    }

    let mut has_debit = false;
    let mut has_credit = false;
    for line in &draft.lines {
        if line.amount <= Decimal::ZERO {
            return Err(LedgerError::malformed("line amount must be positive"));
        }
        match line.side {
            Side::Debit => has_debit = true,
            Side::Credit => has_credit = true,
        }
    }
    if !has_debit || !has_credit {
        return Err(LedgerError::malformed(
            "entry must have both debit and credit lines",
        ));
    }

    // 3. Exact balance at the lowest currency unit; no rounding drift.
    let debits = draft.debit_total();
    let credits = draft.credit_total();
    if debits != credits {
        return Err(LedgerError::UnbalancedEntry { debits, credits });
    }

    Ok(())
}
