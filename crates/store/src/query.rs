//! Trial balance and account ledger queries.
//!
//! Reads take the state lock shared, so they see only fully-committed
//! entries and never block each other. Balances are recomputed from the
//! line history on every read; the per-account index keeps that to one
//! scan per account.

use chrono::NaiveDate;

use printfarm_core::accounts::AccountCode;
use printfarm_core::ledger::LedgerError;
use printfarm_core::reports::{
    AccountActivity, AccountLedger, TrialBalanceReport, build_trial_balance,
};

use crate::ledger::GeneralLedger;

impl GeneralLedger {
    /// Builds the trial balance as of a date.
    ///
    /// Every registered account is reported, including flat ones; entries
    /// count by their `posted_at` date, not by period boundary. The
    /// report's `is_balanced` flag is computed from the reported balances,
    /// independently of the per-entry guarantee.
    pub async fn trial_balance(&self, as_of: NaiveDate) -> TrialBalanceReport {
        let state = self.state.read().await;
        let activities: Vec<AccountActivity> = self
            .registry
            .all()
            .into_iter()
            .map(|account| {
                let (debit_total, credit_total) = state.activity_as_of(account.code, as_of);
                AccountActivity {
                    account,
                    debit_total,
                    credit_total,
                }
            })
            .collect();
        drop(state);

        build_trial_balance(as_of, &activities)
    }

    /// Returns an account's ledger over a date range (inclusive).
    ///
    /// The running balance starts from the account's balance immediately
    /// prior to the range. The returned ledger is a snapshot: iterating it
    /// is lazy and restartable, and later postings do not mutate it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnknownAccount` for an unregistered code.
    pub async fn account_ledger(
        &self,
        code: AccountCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<AccountLedger, LedgerError> {
        let account = self
            .registry
            .get(code)
            .ok_or(LedgerError::UnknownAccount(code))?;

        let state = self.state.read().await;
        let before = from.pred_opt().unwrap_or(NaiveDate::MIN);
        let (debit_before, credit_before) = state.activity_as_of(code, before);
        let opening_balance = account
            .normal_balance()
            .balance_change(debit_before, credit_before);
        let facts = state.facts_where(code, |date| date >= from && date <= to);
        drop(state);

        Ok(AccountLedger::new(account, from, to, opening_balance, facts))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use printfarm_core::accounts::codes;
    use printfarm_core::ledger::entry::SourceDocument;
    use printfarm_core::ledger::types::{EntryDraft, LineInput};
    use printfarm_shared::config::LedgerConfig;

    use crate::ledger::GeneralLedger;

    async fn ledger_with_current_period() -> GeneralLedger {
        let ledger = GeneralLedger::with_default_chart(LedgerConfig::default());
        let today = Utc::now().date_naive();
        ledger
            .add_period(
                "Current",
                today.pred_opt().unwrap(),
                today.succ_opt().unwrap(),
            )
            .await
            .unwrap();
        ledger
    }

    fn two_line_draft(
        debit: printfarm_core::accounts::AccountCode,
        credit: printfarm_core::accounts::AccountCode,
        amount: rust_decimal::Decimal,
    ) -> EntryDraft {
        EntryDraft::new(
            SourceDocument::ManualAdjustment(Uuid::new_v4()),
            "adjustment",
            vec![LineInput::debit(debit, amount), LineInput::credit(credit, amount)],
        )
    }

    #[tokio::test]
    async fn test_trial_balance_reports_all_accounts() {
        let ledger = ledger_with_current_period().await;
        let report = ledger.trial_balance(Utc::now().date_naive()).await;

        assert_eq!(report.rows.len(), ledger.registry().len());
        assert!(report.totals.is_balanced);
        assert_eq!(report.totals.total_debit, dec!(0));
    }

    #[tokio::test]
    async fn test_trial_balance_nets_on_natural_side() {
        let ledger = ledger_with_current_period().await;
        ledger
            .post(two_line_draft(
                codes::RAW_MATERIALS,
                codes::ACCOUNTS_PAYABLE,
                dec!(1000),
            ))
            .await
            .unwrap();
        ledger
            .post(two_line_draft(
                codes::WORK_IN_PROGRESS,
                codes::RAW_MATERIALS,
                dec!(400),
            ))
            .await
            .unwrap();

        let report = ledger.trial_balance(Utc::now().date_naive()).await;

        let raw = report.row(codes::RAW_MATERIALS).unwrap();
        assert_eq!(raw.debit_balance, dec!(600));
        assert_eq!(raw.credit_balance, dec!(0));
        assert_eq!(raw.debit_total, dec!(1000));
        assert_eq!(raw.credit_total, dec!(400));

        let payable = report.row(codes::ACCOUNTS_PAYABLE).unwrap();
        assert_eq!(payable.credit_balance, dec!(1000));
        assert!(report.totals.is_balanced);
    }

    #[tokio::test]
    async fn test_trial_balance_respects_as_of_date() {
        let ledger = ledger_with_current_period().await;
        ledger
            .post(two_line_draft(
                codes::RAW_MATERIALS,
                codes::ACCOUNTS_PAYABLE,
                dec!(100),
            ))
            .await
            .unwrap();

        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        let report = ledger.trial_balance(yesterday).await;
        assert_eq!(report.row(codes::RAW_MATERIALS).unwrap().debit_balance, dec!(0));
    }

    #[tokio::test]
    async fn test_account_ledger_running_balance() {
        let ledger = ledger_with_current_period().await;
        ledger
            .post(two_line_draft(
                codes::RAW_MATERIALS,
                codes::ACCOUNTS_PAYABLE,
                dec!(100),
            ))
            .await
            .unwrap();
        ledger
            .post(two_line_draft(
                codes::WORK_IN_PROGRESS,
                codes::RAW_MATERIALS,
                dec!(40),
            ))
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let account_ledger = ledger
            .account_ledger(codes::RAW_MATERIALS, today, today)
            .await
            .unwrap();

        let balances: Vec<_> = account_ledger
            .rows()
            .map(|row| row.running_balance)
            .collect();
        assert_eq!(balances, vec![dec!(100), dec!(60)]);

        // Restartable: a second iteration repeats the same rows.
        let again: Vec<_> = account_ledger
            .rows()
            .map(|row| row.running_balance)
            .collect();
        assert_eq!(again, balances);
    }

    #[tokio::test]
    async fn test_account_ledger_opening_balance_before_range() {
        let ledger = GeneralLedger::with_default_chart(LedgerConfig::default());
        ledger
            .add_monthly_periods(
                chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            )
            .await
            .unwrap();
        let actor = printfarm_shared::types::UserId::new();

        let january = chrono::NaiveDate::from_ymd_opt(2026, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc();
        let february = chrono::NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc();

        ledger
            .post_backdated(
                two_line_draft(codes::RAW_MATERIALS, codes::ACCOUNTS_PAYABLE, dec!(500)),
                january,
                actor,
            )
            .await
            .unwrap();
        ledger
            .post_backdated(
                two_line_draft(codes::WORK_IN_PROGRESS, codes::RAW_MATERIALS, dec!(200)),
                february,
                actor,
            )
            .await
            .unwrap();

        let account_ledger = ledger
            .account_ledger(
                codes::RAW_MATERIALS,
                chrono::NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(account_ledger.opening_balance, dec!(500));
        assert_eq!(account_ledger.closing_balance(), dec!(300));
        assert_eq!(account_ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_account_ledger_unknown_account() {
        let ledger = ledger_with_current_period().await;
        let today = Utc::now().date_naive();
        let code = printfarm_core::accounts::AccountCode::new(1999).unwrap();

        let err = ledger.account_ledger(code, today, today).await.unwrap_err();
        assert!(matches!(
            err,
            printfarm_core::ledger::LedgerError::UnknownAccount(_)
        ));
    }
}
