//! Offsetting-entry construction for corrections.
//!
//! Posted entries are immutable; a mistake is corrected by posting a new
//! entry that swaps every line's side. The offset targets the same source
//! document under a distinct step marker so both postings stay retry-safe.

use super::entry::{JournalEntry, PostingKey};
use super::types::{EntryDraft, LineInput};

/// Builds a draft that exactly offsets a committed entry.
///
/// For each original line, debits become credits and credits become debits;
/// amounts and accounts are preserved. The description is prefixed with
/// "Offset: " and the deduplication key reuses the original source with an
/// `offset:<entry-id>` step marker, so offsetting the same entry twice is
/// rejected as a duplicate.
#[must_use]
pub fn offsetting_draft(original: &JournalEntry) -> EntryDraft {
    let lines = original
        .lines
        .iter()
        .map(|line| LineInput {
            account_code: line.account_code,
            side: line.side.opposite(),
            amount: line.amount,
        })
        .collect();

    EntryDraft::new(
        original.source,
        format!("Offset: {}", original.description),
        lines,
    )
    .with_posting_key(PostingKey::new(
        original.source,
        format!("offset:{}", original.id),
    ))
}
