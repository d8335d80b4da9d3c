//! Property-based tests for entry draft validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::accounts::AccountCode;

use super::entry::{Side, SourceDocument};
use super::error::LedgerError;
use super::types::{EntryDraft, LineInput};
use super::validation::validate_draft;

/// Strategy to generate a valid positive amount (> 0), in cents.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a valid account code.
fn account_code() -> impl Strategy<Value = AccountCode> {
    (1000u16..=5999).prop_map(|n| AccountCode::new(n).unwrap())
}

/// Strategy to generate a side.
fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

fn draft(lines: Vec<LineInput>) -> EntryDraft {
    EntryDraft::new(
        SourceDocument::ManualAdjustment(Uuid::nil()),
        "generated entry",
        lines,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A pairwise-mirrored draft (every debit matched by an equal credit)
    /// always validates.
    #[test]
    fn prop_mirrored_drafts_validate(
        amounts in prop::collection::vec(positive_amount(), 1..8),
        codes in prop::collection::vec(account_code(), 2),
    ) {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in &amounts {
            lines.push(LineInput::debit(codes[0], *amount));
            lines.push(LineInput::credit(codes[1], *amount));
        }
        let d = draft(lines);
        prop_assert!(validate_draft(&d, |_| true).is_ok());
    }

    /// Perturbing any single line of a balanced draft breaks the balance
    /// and is rejected.
    #[test]
    fn prop_perturbed_drafts_rejected(
        amount in positive_amount(),
        delta in (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        perturb_debit in any::<bool>(),
        codes in prop::collection::vec(account_code(), 2),
    ) {
        let (debit, credit) = if perturb_debit {
            (amount + delta, amount)
        } else {
            (amount, amount + delta)
        };
        let d = draft(vec![
            LineInput::debit(codes[0], debit),
            LineInput::credit(codes[1], credit),
        ]);
        let rejected = matches!(
            validate_draft(&d, |_| true),
            Err(LedgerError::UnbalancedEntry { .. })
        );
        prop_assert!(rejected);
    }

    /// Non-positive amounts are rejected regardless of everything else.
    #[test]
    fn prop_non_positive_amounts_rejected(
        bad_cents in -100_000_000i64..=0,
        side in side_strategy(),
        amount in positive_amount(),
        codes in prop::collection::vec(account_code(), 2),
    ) {
        let bad = Decimal::new(bad_cents, 2);
        let d = draft(vec![
            LineInput { account_code: codes[0], side, amount: bad },
            LineInput { account_code: codes[1], side: side.opposite(), amount },
        ]);
        let rejected = matches!(
            validate_draft(&d, |_| true),
            Err(LedgerError::MalformedEntry { .. })
        );
        prop_assert!(rejected);
    }

    /// Single-sided drafts are rejected even when the side nets to itself.
    #[test]
    fn prop_single_sided_rejected(
        amounts in prop::collection::vec(positive_amount(), 2..6),
        side in side_strategy(),
        code in account_code(),
    ) {
        let lines = amounts
            .iter()
            .map(|amount| LineInput { account_code: code, side, amount: *amount })
            .collect();
        let d = draft(lines);
        let rejected = matches!(
            validate_draft(&d, |_| true),
            Err(LedgerError::MalformedEntry { .. })
        );
        prop_assert!(rejected);
    }

    /// An unknown account is reported before any shape or balance problem.
    #[test]
    fn prop_unknown_account_reported_first(
        amount in positive_amount(),
        code in account_code(),
    ) {
        // Unbalanced AND single-line AND unknown: unknown account wins.
        let d = draft(vec![LineInput::debit(code, amount)]);
        prop_assert!(matches!(
            validate_draft(&d, |_| false),
            Err(LedgerError::UnknownAccount(_))
        ));
    }
}
