//! Double-entry journal logic.
//!
//! This module implements the heart of the posting engine:
//! - Journal entries and lines (immutable once committed)
//! - Polymorphic source-document references and posting keys
//! - Draft types for entry creation
//! - Business rule validation
//! - Posting templates for print-farm business events
//! - Offsetting-entry construction for corrections
//! - Error types for ledger operations

pub mod entry;
pub mod error;
pub mod events;
pub mod offset;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use entry::{JournalEntry, JournalLine, PostingKey, Side, SourceDocument, SourceKind};
pub use error::LedgerError;
pub use events::BusinessEvent;
pub use offset::offsetting_draft;
pub use types::{EntryDraft, LineInput};
pub use validation::validate_draft;
