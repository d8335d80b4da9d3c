//! The insert-only ledger state.
//!
//! Everything in here sits behind the `GeneralLedger` lock. Entries are
//! keyed by id and never updated or deleted; a per-account line index
//! keeps balance scans from walking the whole journal.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use printfarm_core::accounts::AccountCode;
use printfarm_core::fiscal::FiscalPeriod;
use printfarm_core::ledger::entry::{JournalEntry, PostingKey, Side};
use printfarm_core::reports::LedgerFact;
use printfarm_shared::types::{FiscalPeriodId, JournalEntryId};

/// Mutable ledger state, guarded by the `GeneralLedger` lock.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    /// Committed entries, keyed by id. Insert-only.
    pub(crate) entries: BTreeMap<JournalEntryId, JournalEntry>,
    /// Per-account line facts for balance scans.
    account_lines: HashMap<AccountCode, Vec<LedgerFact>>,
    /// Deduplication index: posting key -> committed entry.
    posting_keys: HashMap<PostingKey, JournalEntryId>,
    /// Fiscal periods, keyed by id.
    pub(crate) periods: BTreeMap<FiscalPeriodId, FiscalPeriod>,
}

impl LedgerState {
    /// Returns the period covering a date, if any.
    pub(crate) fn find_period_for_date(&self, date: NaiveDate) -> Option<&FiscalPeriod> {
        self.periods.values().find(|p| p.contains_date(date))
    }

    /// Returns true if a posting key was already committed.
    pub(crate) fn posting_key_used(&self, key: &PostingKey) -> bool {
        self.posting_keys.contains_key(key)
    }

    /// Inserts a committed entry and indexes its lines and posting key.
    ///
    /// The caller has already validated the entry; this must not fail
    /// part-way, so it only performs infallible map inserts.
    pub(crate) fn insert_entry(&mut self, entry: JournalEntry, key: Option<PostingKey>) {
        for line in &entry.lines {
            self.account_lines
                .entry(line.account_code)
                .or_default()
                .push(LedgerFact {
                    entry_id: entry.id,
                    posted_at: entry.posted_at,
                    description: entry.description.clone(),
                    side: line.side,
                    amount: line.amount,
                });
        }
        if let Some(key) = key {
            self.posting_keys.insert(key, entry.id);
        }
        self.entries.insert(entry.id, entry);
    }

    /// Returns the entries recorded against a period.
    pub(crate) fn entries_in_period(
        &self,
        period_id: FiscalPeriodId,
    ) -> impl Iterator<Item = &JournalEntry> {
        self.entries.values().filter(move |e| e.period_id == period_id)
    }

    /// Returns true if any journal line references this account.
    pub(crate) fn account_referenced(&self, code: AccountCode) -> bool {
        self.account_lines
            .get(&code)
            .is_some_and(|facts| !facts.is_empty())
    }

    /// Sums an account's debit and credit activity posted on or before
    /// `as_of`.
    pub(crate) fn activity_as_of(&self, code: AccountCode, as_of: NaiveDate) -> (Decimal, Decimal) {
        let mut debit_total = Decimal::ZERO;
        let mut credit_total = Decimal::ZERO;
        if let Some(facts) = self.account_lines.get(&code) {
            for fact in facts {
                if fact.posted_at.date_naive() > as_of {
                    continue;
                }
                match fact.side {
                    Side::Debit => debit_total += fact.amount,
                    Side::Credit => credit_total += fact.amount,
                }
            }
        }
        (debit_total, credit_total)
    }

    /// Returns copies of an account's line facts matching a date filter.
    pub(crate) fn facts_where<F>(&self, code: AccountCode, mut keep: F) -> Vec<LedgerFact>
    where
        F: FnMut(NaiveDate) -> bool,
    {
        self.account_lines
            .get(&code)
            .map(|facts| {
                facts
                    .iter()
                    .filter(|f| keep(f.posted_at.date_naive()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
