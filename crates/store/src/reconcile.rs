//! Inventory valuation reconciliation against the GL.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use printfarm_core::ledger::LedgerError;
use printfarm_core::reconcile::{InventoryCategory, ValuationSnapshot};

use crate::ledger::GeneralLedger;

/// Failure reported by the inventory collaborator.
#[derive(Debug, Clone, Error)]
#[error("inventory subsystem unavailable: {0}")]
pub struct InventoryError(pub String);

/// The physical inventory collaborator.
///
/// Owned by the inventory subsystem; the ledger only asks for the
/// physically-counted value of a category as of a date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhysicalInventory: Send + Sync {
    /// Returns the physical valuation of a category as of a date.
    async fn physical_valuation(
        &self,
        category: InventoryCategory,
        as_of: NaiveDate,
    ) -> Result<Decimal, InventoryError>;
}

impl GeneralLedger {
    /// Reconciles the physical inventory valuation against the GL balances
    /// of the four inventory accounts.
    ///
    /// One snapshot per category, `variance = physical_value - gl_balance`.
    /// This is a read-only diagnostic: variances are reported per category
    /// and never corrected or aggregated away.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Inventory` (retryable) when the collaborator
    /// fails.
    pub async fn reconcile_inventory(
        &self,
        as_of: NaiveDate,
        inventory: &dyn PhysicalInventory,
    ) -> Result<Vec<ValuationSnapshot>, LedgerError> {
        // GL balances first, in one consistent read; the collaborator is
        // only called after the lock is released.
        let state = self.state.read().await;
        let gl_balances: Vec<(InventoryCategory, Decimal)> = InventoryCategory::ALL
            .into_iter()
            .map(|category| {
                let code = category.gl_account_code();
                let (debit_total, credit_total) = state.activity_as_of(code, as_of);
                // Inventory accounts are debit-normal assets.
                (category, debit_total - credit_total)
            })
            .collect();
        drop(state);

        let mut snapshots = Vec::with_capacity(gl_balances.len());
        for (category, gl_balance) in gl_balances {
            let physical_value = inventory
                .physical_valuation(category, as_of)
                .await
                .map_err(|e| LedgerError::Inventory(e.to_string()))?;
            snapshots.push(ValuationSnapshot::new(category, gl_balance, physical_value));
        }

        info!(
            as_of = %as_of,
            mismatches = snapshots.iter().filter(|s| !s.matches()).count(),
            "inventory reconciliation completed"
        );
        Ok(snapshots)
    }
}
