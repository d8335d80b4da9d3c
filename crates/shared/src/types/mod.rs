//! Shared type definitions.

pub mod id;

pub use id::{FiscalPeriodId, JournalEntryId, JournalLineId, UserId};
