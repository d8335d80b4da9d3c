//! Inventory valuation reconciliation.
//!
//! Compares the physical inventory valuation (owned by the inventory
//! subsystem) against the GL balances of the four inventory accounts. A
//! variance is a diagnostic to triage, never something to auto-correct:
//! manual adjustments, pre-system inventory, timing differences, and
//! incomplete transactions are documented causes, not detected ones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountCode, codes};

/// The four inventory categories tracked by the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryCategory {
    /// Filament, resin, and other raw inputs.
    RawMaterials,
    /// Jobs on the printers.
    WorkInProgress,
    /// Printed goods awaiting shipment.
    FinishedGoods,
    /// Boxes, filler, labels.
    Packaging,
}

impl InventoryCategory {
    /// All categories, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::RawMaterials,
        Self::WorkInProgress,
        Self::FinishedGoods,
        Self::Packaging,
    ];

    /// Returns the GL account that carries this category's value.
    #[must_use]
    pub const fn gl_account_code(self) -> AccountCode {
        match self {
            Self::RawMaterials => codes::RAW_MATERIALS,
            Self::WorkInProgress => codes::WORK_IN_PROGRESS,
            Self::FinishedGoods => codes::FINISHED_GOODS,
            Self::Packaging => codes::PACKAGING,
        }
    }
}

impl std::fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawMaterials => write!(f, "raw_materials"),
            Self::WorkInProgress => write!(f, "wip"),
            Self::FinishedGoods => write!(f, "finished_goods"),
            Self::Packaging => write!(f, "packaging"),
        }
    }
}

/// Comparison of one category's physical valuation against its GL balance.
///
/// Derived on demand; never persisted as a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// The inventory category.
    pub category: InventoryCategory,
    /// The GL account the category maps to.
    pub gl_account_code: AccountCode,
    /// The GL balance as of the reconciliation date.
    pub gl_balance: Decimal,
    /// The physical valuation reported by the inventory subsystem.
    pub physical_value: Decimal,
    /// `physical_value - gl_balance`.
    pub variance: Decimal,
}

impl ValuationSnapshot {
    /// Builds a snapshot, computing the variance.
    #[must_use]
    pub fn new(category: InventoryCategory, gl_balance: Decimal, physical_value: Decimal) -> Self {
        Self {
            category,
            gl_account_code: category.gl_account_code(),
            gl_balance,
            physical_value,
            variance: physical_value - gl_balance,
        }
    }

    /// Returns true if the physical count matches the books exactly.
    #[must_use]
    pub fn matches(&self) -> bool {
        self.variance == Decimal::ZERO
    }
}
