//! Trial balance generation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::{GlAccount, NormalBalance};

use super::types::{TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};

/// An account's raw debit/credit activity, aggregated by the store.
#[derive(Debug, Clone)]
pub struct AccountActivity {
    /// The account.
    pub account: GlAccount,
    /// Sum of debit line amounts.
    pub debit_total: Decimal,
    /// Sum of credit line amounts.
    pub credit_total: Decimal,
}

/// Nets one account's activity against its normal balance.
///
/// The net balance is reported on the account's natural side; an abnormal
/// (net-negative) balance is reported on the opposite side rather than
/// hidden or clamped.
#[must_use]
pub fn trial_balance_row(activity: &AccountActivity) -> TrialBalanceRow {
    let normal = activity.account.normal_balance();
    let net = normal.balance_change(activity.debit_total, activity.credit_total);

    let (debit_balance, credit_balance) = match (normal, net >= Decimal::ZERO) {
        (NormalBalance::Debit, true) => (net, Decimal::ZERO),
        (NormalBalance::Debit, false) => (Decimal::ZERO, -net),
        (NormalBalance::Credit, true) => (Decimal::ZERO, net),
        (NormalBalance::Credit, false) => (-net, Decimal::ZERO),
    };

    TrialBalanceRow {
        account_code: activity.account.code,
        account_name: activity.account.name.clone(),
        account_type: activity.account.account_type,
        debit_total: activity.debit_total,
        credit_total: activity.credit_total,
        debit_balance,
        credit_balance,
    }
}

/// Builds a trial balance report from per-account activity.
///
/// Totals are summed over the reported *balances*, not over the raw line
/// sums, so the `is_balanced` flag is an independent cross-check: it holds
/// exactly when the underlying entry history nets to zero.
#[must_use]
pub fn build_trial_balance(as_of: NaiveDate, activities: &[AccountActivity]) -> TrialBalanceReport {
    let mut rows: Vec<TrialBalanceRow> = activities.iter().map(trial_balance_row).collect();
    rows.sort_by_key(|r| r.account_code);

    let total_debit: Decimal = rows.iter().map(|r| r.debit_balance).sum();
    let total_credit: Decimal = rows.iter().map(|r| r.credit_balance).sum();

    TrialBalanceReport {
        as_of,
        rows,
        totals: TrialBalanceTotals {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        },
    }
}


/// Property-based tests for the trial balance cross-check.
#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    use crate::accounts::{AccountCode, AccountType};

    fn amount() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn account_type() -> impl Strategy<Value = AccountType> {
        prop_oneof![
            Just(AccountType::Asset),
            Just(AccountType::Liability),
            Just(AccountType::Equity),
            Just(AccountType::Revenue),
            Just(AccountType::Expense),
        ]
    }

    /// A valid code whose leading digit matches the type.
    fn code_for(t: AccountType) -> AccountCode {
        AccountCode::new(t.code_prefix() * 1000).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Exactly one side of a trial balance row is nonzero (or both are
        /// zero for a flat account).
        #[test]
        fn prop_row_reports_single_side(
            t in account_type(),
            debit in amount(),
            credit in amount(),
        ) {
            let row = trial_balance_row(&AccountActivity {
                account: GlAccount::new(code_for(t), "generated", t).unwrap(),
                debit_total: debit,
                credit_total: credit,
            });

            prop_assert!(
                row.debit_balance == Decimal::ZERO || row.credit_balance == Decimal::ZERO
            );
            prop_assert!(row.debit_balance >= Decimal::ZERO);
            prop_assert!(row.credit_balance >= Decimal::ZERO);
            // The two reported sides always net back to the raw activity.
            prop_assert_eq!(row.debit_balance - row.credit_balance, debit - credit);
        }

        /// When every account's raw activity comes from balanced entries,
        /// the report's totals agree.
        #[test]
        fn prop_mirrored_activity_is_balanced(
            amounts in prop::collection::vec(amount(), 1..10),
        ) {
            // Mirror each amount into a debit-normal and a credit-normal
            // account, the way a balanced two-line entry would.
            let debit_total: Decimal = amounts.iter().copied().sum();
            let activities = vec![
                AccountActivity {
                    account: GlAccount::new(code_for(AccountType::Asset), "assets", AccountType::Asset)
                        .unwrap(),
                    debit_total,
                    credit_total: Decimal::ZERO,
                },
                AccountActivity {
                    account: GlAccount::new(
                        code_for(AccountType::Liability),
                        "liabilities",
                        AccountType::Liability,
                    )
                    .unwrap(),
                    debit_total: Decimal::ZERO,
                    credit_total: debit_total,
                },
            ];

            let report = build_trial_balance(
                NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
                &activities,
            );
            prop_assert!(report.totals.is_balanced);
        }
    }
}
