//! Fiscal period state machine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use printfarm_shared::types::{FiscalPeriodId, UserId};

use super::calendar::validate_date_range;
use super::error::PeriodError;

/// Status of a fiscal period.
///
/// Deliberately a two-state machine rather than a boolean scattered across
/// checks; `FiscalPeriod::close` and `FiscalPeriod::reopen` are the only
/// mutation paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period is closed; postings are rejected.
    Closed,
}

/// A fiscal period.
///
/// Periods are created administratively ahead of use, cycle between Open
/// and Closed arbitrarily many times, and are never deleted while journal
/// entries reference them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
    /// Who last closed the period.
    pub closed_by: Option<UserId>,
    /// When the period was last closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who last reopened the period.
    pub reopened_by: Option<UserId>,
    /// When the period was last reopened.
    pub reopened_at: Option<DateTime<Utc>>,
}

impl FiscalPeriod {
    /// Creates a new open period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidDateRange` when `start_date` is after
    /// `end_date`.
    pub fn open(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, PeriodError> {
        validate_date_range(start_date, end_date)?;
        Ok(Self {
            id: FiscalPeriodId::new(),
            name: name.into(),
            start_date,
            end_date,
            status: PeriodStatus::Open,
            closed_by: None,
            closed_at: None,
            reopened_by: None,
            reopened_at: None,
        })
    }

    /// Returns true if postings may target this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Closes the period, recording the closing actor.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidTransition` if the period is already
    /// closed.
    pub fn close(&mut self, actor: UserId, at: DateTime<Utc>) -> Result<(), PeriodError> {
        if self.status == PeriodStatus::Closed {
            return Err(PeriodError::InvalidTransition {
                from: PeriodStatus::Closed,
                to: PeriodStatus::Closed,
            });
        }
        self.status = PeriodStatus::Closed;
        self.closed_by = Some(actor);
        self.closed_at = Some(at);
        Ok(())
    }

    /// Reopens a closed period, recording the reopening actor.
    ///
    /// Privilege is the authorization collaborator's concern; this records
    /// who did it and when. Historical entries are not re-validated.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidTransition` if the period is already
    /// open.
    pub fn reopen(&mut self, actor: UserId, at: DateTime<Utc>) -> Result<(), PeriodError> {
        if self.status == PeriodStatus::Open {
            return Err(PeriodError::InvalidTransition {
                from: PeriodStatus::Open,
                to: PeriodStatus::Open,
            });
        }
        self.status = PeriodStatus::Open;
        self.reopened_by = Some(actor);
        self.reopened_at = Some(at);
        Ok(())
    }
}
