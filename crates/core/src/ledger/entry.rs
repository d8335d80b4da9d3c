//! Journal entry domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use printfarm_shared::types::{FiscalPeriodId, JournalEntryId, JournalLineId, UserId};

use crate::accounts::AccountCode;

/// One side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit (increases asset/expense accounts).
    Debit,
    /// Credit (increases liability/equity/revenue accounts).
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Kind of source document that triggered a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Purchase order (receipt of raw materials).
    PurchaseOrder,
    /// Production order (issue, QC pass, scrap).
    ProductionOrder,
    /// Sales order (shipment).
    SalesOrder,
    /// Physical inventory count.
    InventoryCount,
    /// Manual adjustment by an operator.
    ManualAdjustment,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PurchaseOrder => write!(f, "purchase_order"),
            Self::ProductionOrder => write!(f, "production_order"),
            Self::SalesOrder => write!(f, "sales_order"),
            Self::InventoryCount => write!(f, "inventory_count"),
            Self::ManualAdjustment => write!(f, "manual_adjustment"),
        }
    }
}

/// Reference to the business document that triggered an entry.
///
/// The ledger never dereferences these: the owning subsystem resolves them
/// lazily. A weak reference by kind + opaque id keeps the ledger core free
/// of the other subsystems' types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SourceDocument {
    /// A purchase order in the purchasing subsystem.
    PurchaseOrder(Uuid),
    /// A production order in the production subsystem.
    ProductionOrder(Uuid),
    /// A sales order in the order subsystem.
    SalesOrder(Uuid),
    /// A physical inventory count.
    InventoryCount(Uuid),
    /// A manual adjustment document.
    ManualAdjustment(Uuid),
}

impl SourceDocument {
    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::PurchaseOrder(_) => SourceKind::PurchaseOrder,
            Self::ProductionOrder(_) => SourceKind::ProductionOrder,
            Self::SalesOrder(_) => SourceKind::SalesOrder,
            Self::InventoryCount(_) => SourceKind::InventoryCount,
            Self::ManualAdjustment(_) => SourceKind::ManualAdjustment,
        }
    }

    /// Returns the opaque document id.
    #[must_use]
    pub const fn doc_id(&self) -> Uuid {
        match self {
            Self::PurchaseOrder(id)
            | Self::ProductionOrder(id)
            | Self::SalesOrder(id)
            | Self::InventoryCount(id)
            | Self::ManualAdjustment(id) => *id,
        }
    }
}

impl std::fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.doc_id())
    }
}

/// Deduplication key for retry-safe posting.
///
/// Callers that may retry after a transient failure supply the same key;
/// the engine rejects the second post for the same logical event instead of
/// double-booking it. The step marker distinguishes multiple postings from
/// one document (e.g. a shipment's COGS step vs its packaging step).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostingKey {
    /// The triggering document.
    pub source: SourceDocument,
    /// Logical step marker within the document's lifecycle.
    pub step: String,
}

impl PostingKey {
    /// Creates a posting key for a document and step marker.
    #[must_use]
    pub fn new(source: SourceDocument, step: impl Into<String>) -> Self {
        Self {
            source,
            step: step.into(),
        }
    }
}

impl std::fmt::Display for PostingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source, self.step)
    }
}

/// A single line of a journal entry.
///
/// Lines are owned exclusively by their entry and never exist independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier for this line.
    pub id: JournalLineId,
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// The account affected by this line.
    pub account_code: AccountCode,
    /// Whether this is a debit or credit.
    pub side: Side,
    /// Line amount (strictly positive).
    pub amount: Decimal,
}

impl JournalLine {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount,
            Side::Credit => -self.amount,
        }
    }
}

/// A committed journal entry.
///
/// Entries are created atomically by the posting engine and immutable once
/// committed; corrections are made via new offsetting entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier (UUIDv7, time-ordered).
    pub id: JournalEntryId,
    /// The fiscal period this entry is recorded in.
    pub period_id: FiscalPeriodId,
    /// When the entry was posted (determines the period).
    pub posted_at: DateTime<Utc>,
    /// The business document that triggered the entry.
    pub source: SourceDocument,
    /// Entry description.
    pub description: String,
    /// Actor recorded for privileged backdated posts.
    pub posted_by: Option<UserId>,
    /// The balanced set of lines (at least two).
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Returns the total debit amount across all lines.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum()
    }

    /// Returns the total credit amount across all lines.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum()
    }

    /// Returns true if debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}
