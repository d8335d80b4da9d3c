//! Draft types for journal entry creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountCode;

use super::entry::{PostingKey, Side, SourceDocument};

/// Input for a single journal line in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// The account to post to.
    pub account_code: AccountCode,
    /// Whether this is a debit or credit line.
    pub side: Side,
    /// The line amount (must be strictly positive).
    pub amount: Decimal,
}

impl LineInput {
    /// Creates a debit line input.
    #[must_use]
    pub const fn debit(account_code: AccountCode, amount: Decimal) -> Self {
        Self {
            account_code,
            side: Side::Debit,
            amount,
        }
    }

    /// Creates a credit line input.
    #[must_use]
    pub const fn credit(account_code: AccountCode, amount: Decimal) -> Self {
        Self {
            account_code,
            side: Side::Credit,
            amount,
        }
    }
}

/// A draft journal entry awaiting validation and commit.
///
/// Drafts carry everything the posting engine needs; the engine assigns the
/// entry id, line ids, and the definitive timestamp at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Explicit posting timestamp; `None` means "now".
    pub posted_at: Option<DateTime<Utc>>,
    /// The business document that triggered the entry.
    pub source: SourceDocument,
    /// Entry description.
    pub description: String,
    /// Optional deduplication key for retry-safe posting.
    pub posting_key: Option<PostingKey>,
    /// The lines (must have at least 2).
    pub lines: Vec<LineInput>,
}

impl EntryDraft {
    /// Creates a draft posted "now" with no deduplication key.
    #[must_use]
    pub fn new(
        source: SourceDocument,
        description: impl Into<String>,
        lines: Vec<LineInput>,
    ) -> Self {
        Self {
            posted_at: None,
            source,
            description: description.into(),
            posting_key: None,
            lines,
        }
    }

    /// Attaches a deduplication key.
    #[must_use]
    pub fn with_posting_key(mut self, key: PostingKey) -> Self {
        self.posting_key = Some(key);
        self
    }

    /// Pins the draft to an explicit posting timestamp.
    #[must_use]
    pub fn at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = Some(posted_at);
        self
    }

    /// Returns the total debit amount across line inputs.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum()
    }

    /// Returns the total credit amount across line inputs.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_draft_totals() {
        let draft = EntryDraft::new(
            SourceDocument::ManualAdjustment(Uuid::new_v4()),
            "test",
            vec![
                LineInput::debit(AccountCode::new(1000).unwrap(), dec!(70)),
                LineInput::debit(AccountCode::new(1100).unwrap(), dec!(30)),
                LineInput::credit(AccountCode::new(4000).unwrap(), dec!(100)),
            ],
        );
        assert_eq!(draft.debit_total(), dec!(100));
        assert_eq!(draft.credit_total(), dec!(100));
    }

    #[test]
    fn test_draft_builders() {
        let source = SourceDocument::PurchaseOrder(Uuid::new_v4());
        let key = PostingKey::new(source, "receipt");
        let ts = Utc::now();
        let draft = EntryDraft::new(source, "receipt", vec![])
            .with_posting_key(key.clone())
            .at(ts);
        assert_eq!(draft.posting_key, Some(key));
        assert_eq!(draft.posted_at, Some(ts));
    }
}
