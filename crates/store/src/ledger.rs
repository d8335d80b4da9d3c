//! The posting engine and period manager.

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use printfarm_core::accounts::{AccountCode, AccountError, GlAccount};
use printfarm_core::fiscal::{
    FiscalPeriod, PeriodError, generate_monthly_periods, validate_insertion,
};
use printfarm_core::ledger::entry::{JournalEntry, JournalLine};
use printfarm_core::ledger::types::EntryDraft;
use printfarm_core::ledger::validation::validate_draft;
use printfarm_core::ledger::LedgerError;
use printfarm_shared::config::LedgerConfig;
use printfarm_shared::types::{FiscalPeriodId, JournalEntryId, JournalLineId, UserId};

use crate::registry::AccountRegistry;
use crate::store::LedgerState;

/// The general ledger: account registry, fiscal calendar, and journal.
///
/// Every `post`, `close_period`, `reopen_period`, and query call is an
/// independent unit of work that may run concurrently with others. Writes
/// serialize on the state lock, so an entry's lines commit as one atomic,
/// isolated transaction and a period transition never interleaves with a
/// post targeting it.
#[derive(Debug)]
pub struct GeneralLedger {
    pub(crate) registry: AccountRegistry,
    pub(crate) state: RwLock<LedgerState>,
    policy: LedgerConfig,
}

impl GeneralLedger {
    /// Creates a ledger with an empty account registry.
    #[must_use]
    pub fn new(policy: LedgerConfig) -> Self {
        Self {
            registry: AccountRegistry::new(),
            state: RwLock::new(LedgerState::default()),
            policy,
        }
    }

    /// Creates a ledger seeded with the default print-farm chart.
    #[must_use]
    pub fn with_default_chart(policy: LedgerConfig) -> Self {
        Self {
            registry: AccountRegistry::with_default_chart(),
            state: RwLock::new(LedgerState::default()),
            policy,
        }
    }

    /// Returns the account registry.
    #[must_use]
    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    // ========================================================================
    // Posting
    // ========================================================================

    /// Posts a journal entry to the period covering its date.
    ///
    /// The draft's `posted_at` defaults to now. Validation failures are
    /// detected before any write; on success the entry and its lines are
    /// committed as a single atomic unit and the materialized entry is
    /// returned.
    ///
    /// # Errors
    ///
    /// `UnknownAccount`, `MalformedEntry`, `UnbalancedEntry`,
    /// `PeriodNotFound`, `PeriodClosed`, or `DuplicatePosting`.
    pub async fn post(&self, draft: EntryDraft) -> Result<JournalEntry, LedgerError> {
        self.commit(draft, None).await
    }

    /// Posts a backdated journal entry on behalf of a privileged actor.
    ///
    /// Authorization is the caller's concern; the engine records the actor
    /// on the entry. The target period must exist and be Open at commit
    /// time; backdating into a closed period requires reopening it first.
    ///
    /// # Errors
    ///
    /// Same as [`GeneralLedger::post`].
    pub async fn post_backdated(
        &self,
        draft: EntryDraft,
        posted_at: DateTime<Utc>,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        self.commit(draft.at(posted_at), Some(actor)).await
    }

    async fn commit(
        &self,
        draft: EntryDraft,
        actor: Option<UserId>,
    ) -> Result<JournalEntry, LedgerError> {
        let posted_at = draft.posted_at.unwrap_or_else(Utc::now);
        let posting_date = posted_at.date_naive();

        let mut state = self.state.write().await;

        // Validated under the write lock so the registry cannot drift
        // between validation and commit.
        validate_draft(&draft, |code| self.registry.contains(code))?;

        // Period status is checked at commit time, inside the same critical
        // section as the write: a post racing a close sees strictly the
        // pre- or post-transition state.
        let period = state
            .find_period_for_date(posting_date)
            .ok_or(LedgerError::PeriodNotFound(posting_date))?;
        let period_id = period.id;
        if !period.is_open() {
            return Err(LedgerError::PeriodClosed { period_id });
        }

        if let Some(key) = &draft.posting_key {
            if state.posting_key_used(key) {
                return Err(LedgerError::DuplicatePosting { key: key.clone() });
            }
        }

        let entry_id = JournalEntryId::new();
        let lines: Vec<JournalLine> = draft
            .lines
            .iter()
            .map(|line| JournalLine {
                id: JournalLineId::new(),
                entry_id,
                account_code: line.account_code,
                side: line.side,
                amount: line.amount,
            })
            .collect();
        let entry = JournalEntry {
            id: entry_id,
            period_id,
            posted_at,
            source: draft.source,
            description: draft.description.clone(),
            posted_by: actor,
            lines,
        };

        state.insert_entry(entry.clone(), draft.posting_key);
        drop(state);

        info!(
            entry_id = %entry.id,
            period_id = %period_id,
            source = %entry.source,
            total = %entry.debit_total(),
            backdated = actor.is_some(),
            "journal entry posted"
        );
        Ok(entry)
    }

    /// Returns a committed entry by id.
    pub async fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.state.read().await.entries.get(&id).cloned()
    }

    // ========================================================================
    // Fiscal calendar
    // ========================================================================

    /// Creates a fiscal period adjacent to the existing calendar.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange`, `Overlapping`, or `NotContiguous`.
    pub async fn add_period(
        &self,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FiscalPeriod, PeriodError> {
        let mut state = self.state.write().await;
        let existing: Vec<FiscalPeriod> = state.periods.values().cloned().collect();
        validate_insertion(&existing, start_date, end_date)?;

        let period = FiscalPeriod::open(name, start_date, end_date)?;
        state.periods.insert(period.id, period.clone());
        drop(state);

        info!(period_id = %period.id, name = %period.name, "fiscal period created");
        Ok(period)
    }

    /// Creates contiguous monthly periods covering a date range.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange`, `Overlapping`, or `NotContiguous` against the
    /// existing calendar.
    pub async fn add_monthly_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<FiscalPeriod>, PeriodError> {
        let generated = generate_monthly_periods(start_date, end_date)?;

        let mut state = self.state.write().await;
        let existing: Vec<FiscalPeriod> = state.periods.values().cloned().collect();
        // The generator guarantees internal contiguity; the first period
        // anchors the whole batch against the existing calendar.
        validate_insertion(&existing, start_date, end_date)?;

        for period in &generated {
            state.periods.insert(period.id, period.clone());
        }
        drop(state);

        info!(count = generated.len(), "fiscal calendar extended");
        Ok(generated)
    }

    /// Returns a period by id.
    pub async fn period(&self, id: FiscalPeriodId) -> Option<FiscalPeriod> {
        self.state.read().await.periods.get(&id).cloned()
    }

    /// Returns the period covering a date.
    pub async fn period_for_date(&self, date: NaiveDate) -> Option<FiscalPeriod> {
        self.state.read().await.find_period_for_date(date).cloned()
    }

    /// Closes a fiscal period.
    ///
    /// Re-validates that every entry attributed to the period balances.
    /// That is guaranteed by construction through `post`; the re-check is a
    /// consistency assertion against storage corruption.
    ///
    /// # Errors
    ///
    /// `NotFound`, `HasNoEntries` (when the policy requires entries),
    /// `LedgerInconsistency`, or `InvalidTransition` if already closed.
    pub async fn close_period(
        &self,
        period_id: FiscalPeriodId,
        actor: UserId,
    ) -> Result<FiscalPeriod, PeriodError> {
        let mut state = self.state.write().await;

        if !state.periods.contains_key(&period_id) {
            return Err(PeriodError::NotFound(period_id));
        }

        let mut has_entries = false;
        for entry in state.entries_in_period(period_id) {
            has_entries = true;
            if !entry.is_balanced() {
                return Err(PeriodError::LedgerInconsistency { entry_id: entry.id });
            }
        }
        if self.policy.require_entries_on_close && !has_entries {
            return Err(PeriodError::HasNoEntries(period_id));
        }

        let period = state
            .periods
            .get_mut(&period_id)
            .ok_or(PeriodError::NotFound(period_id))?;
        period.close(actor, Utc::now())?;
        let snapshot = period.clone();
        drop(state);

        info!(period_id = %period_id, closed_by = %actor, "fiscal period closed");
        Ok(snapshot)
    }

    /// Reopens a closed fiscal period.
    ///
    /// Privilege is enforced by the authorization collaborator; the engine
    /// records who did it and when. Historical entries are not
    /// re-validated.
    ///
    /// # Errors
    ///
    /// `NotFound` or `InvalidTransition` if already open.
    pub async fn reopen_period(
        &self,
        period_id: FiscalPeriodId,
        actor: UserId,
    ) -> Result<FiscalPeriod, PeriodError> {
        let mut state = self.state.write().await;
        let period = state
            .periods
            .get_mut(&period_id)
            .ok_or(PeriodError::NotFound(period_id))?;
        period.reopen(actor, Utc::now())?;
        let snapshot = period.clone();
        drop(state);

        warn!(period_id = %period_id, reopened_by = %actor, "fiscal period reopened");
        Ok(snapshot)
    }

    // ========================================================================
    // Account administration
    // ========================================================================

    /// Removes an account that no journal line references.
    ///
    /// # Errors
    ///
    /// `AccountError::Referenced` if any line posts to it, or
    /// `AccountError::Unknown`.
    pub async fn remove_account(&self, code: AccountCode) -> Result<GlAccount, AccountError> {
        // Hold the state lock across the registry removal so a concurrent
        // post cannot slip a reference in between the check and the remove.
        let state = self.state.read().await;
        if state.account_referenced(code) {
            return Err(AccountError::Referenced(code));
        }
        self.registry.remove(code)
    }
}
