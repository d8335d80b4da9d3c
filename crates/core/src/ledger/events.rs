//! Posting templates for print-farm business events.
//!
//! Each business event maps to a fixed double-entry line pattern. The
//! triggering subsystems build one of these and hand it to the posting
//! engine; the account pattern is not theirs to choose.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::accounts::codes;

use super::entry::{PostingKey, SourceDocument};
use super::types::{EntryDraft, LineInput};

/// A business event that triggers a GL posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessEvent {
    /// Raw materials received against a purchase order.
    /// DR Raw Materials (1200) / CR Accounts Payable (2000).
    PurchaseReceipt {
        /// The purchase order being received.
        purchase_order_id: Uuid,
        /// Value of the received materials.
        amount: Decimal,
    },
    /// Materials issued from stock to a production order.
    /// DR WIP (1210) / CR Raw Materials (1200).
    MaterialIssue {
        /// The consuming production order.
        production_order_id: Uuid,
        /// Value of the issued materials.
        amount: Decimal,
    },
    /// A production order passed QC and moved to finished goods.
    /// DR Finished Goods (1220) / CR WIP (1210).
    ProductionQcPass {
        /// The completed production order.
        production_order_id: Uuid,
        /// Value of the completed goods.
        amount: Decimal,
    },
    /// Finished goods shipped against a sales order.
    /// DR COGS (5000) / CR Finished Goods (1220), plus
    /// DR Shipping Expense (5010) / CR Packaging (1230) when packaging was
    /// consumed, as one multi-line entry.
    Shipment {
        /// The shipped sales order.
        sales_order_id: Uuid,
        /// Cost of the shipped goods.
        cogs_amount: Decimal,
        /// Value of consumed packaging (may be zero).
        packaging_amount: Decimal,
    },
    /// A production order failed QC and was scrapped.
    /// DR Scrap Expense (5020) / CR WIP (1210).
    Scrap {
        /// The scrapped production order.
        production_order_id: Uuid,
        /// Value written off.
        amount: Decimal,
    },
}

impl BusinessEvent {
    /// Returns the source document for this event.
    #[must_use]
    pub const fn source(&self) -> SourceDocument {
        match self {
            Self::PurchaseReceipt {
                purchase_order_id, ..
            } => SourceDocument::PurchaseOrder(*purchase_order_id),
            Self::MaterialIssue {
                production_order_id,
                ..
            }
            | Self::ProductionQcPass {
                production_order_id,
                ..
            }
            | Self::Scrap {
                production_order_id,
                ..
            } => SourceDocument::ProductionOrder(*production_order_id),
            Self::Shipment { sales_order_id, .. } => SourceDocument::SalesOrder(*sales_order_id),
        }
    }

    /// Returns the logical step marker used in the deduplication key.
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::PurchaseReceipt { .. } => "receipt",
            Self::MaterialIssue { .. } => "issue",
            Self::ProductionQcPass { .. } => "qc_pass",
            Self::Shipment { .. } => "shipment",
            Self::Scrap { .. } => "scrap",
        }
    }

    /// Builds the entry draft for this event, with the deduplication key
    /// already attached.
    #[must_use]
    pub fn to_draft(&self) -> EntryDraft {
        let (description, lines) = match *self {
            Self::PurchaseReceipt { amount, .. } => (
                "Purchase receipt",
                vec![
                    LineInput::debit(codes::RAW_MATERIALS, amount),
                    LineInput::credit(codes::ACCOUNTS_PAYABLE, amount),
                ],
            ),
            Self::MaterialIssue { amount, .. } => (
                "Material issue to production",
                vec![
                    LineInput::debit(codes::WORK_IN_PROGRESS, amount),
                    LineInput::credit(codes::RAW_MATERIALS, amount),
                ],
            ),
            Self::ProductionQcPass { amount, .. } => (
                "Production completed (QC pass)",
                vec![
                    LineInput::debit(codes::FINISHED_GOODS, amount),
                    LineInput::credit(codes::WORK_IN_PROGRESS, amount),
                ],
            ),
            Self::Shipment {
                cogs_amount,
                packaging_amount,
                ..
            } => {
                let mut lines = vec![
                    LineInput::debit(codes::COST_OF_GOODS_SOLD, cogs_amount),
                    LineInput::credit(codes::FINISHED_GOODS, cogs_amount),
                ];
                if packaging_amount > Decimal::ZERO {
                    lines.push(LineInput::debit(codes::SHIPPING_EXPENSE, packaging_amount));
                    lines.push(LineInput::credit(codes::PACKAGING, packaging_amount));
                }
                ("Shipment", lines)
            }
            Self::Scrap { amount, .. } => (
                "Scrapped production (QC fail)",
                vec![
                    LineInput::debit(codes::SCRAP_EXPENSE, amount),
                    LineInput::credit(codes::WORK_IN_PROGRESS, amount),
                ],
            ),
        };

        let source = self.source();
        EntryDraft::new(source, description, lines)
            .with_posting_key(PostingKey::new(source, self.step()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::ledger::entry::Side;
    use crate::ledger::validation::validate_draft;

    fn assert_pattern(draft: &EntryDraft, expected: &[(u16, Side, Decimal)]) {
        assert_eq!(draft.lines.len(), expected.len());
        for (line, (code, side, amount)) in draft.lines.iter().zip(expected) {
            assert_eq!(line.account_code.value(), *code);
            assert_eq!(line.side, *side);
            assert_eq!(line.amount, *amount);
        }
        assert!(validate_draft(draft, |_| true).is_ok());
    }

    #[test]
    fn test_purchase_receipt_pattern() {
        let event = BusinessEvent::PurchaseReceipt {
            purchase_order_id: Uuid::new_v4(),
            amount: dec!(1000),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (1200, Side::Debit, dec!(1000)),
                (2000, Side::Credit, dec!(1000)),
            ],
        );
    }

    #[test]
    fn test_material_issue_pattern() {
        let event = BusinessEvent::MaterialIssue {
            production_order_id: Uuid::new_v4(),
            amount: dec!(400),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (1210, Side::Debit, dec!(400)),
                (1200, Side::Credit, dec!(400)),
            ],
        );
    }

    #[test]
    fn test_qc_pass_pattern() {
        let event = BusinessEvent::ProductionQcPass {
            production_order_id: Uuid::new_v4(),
            amount: dec!(350),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (1220, Side::Debit, dec!(350)),
                (1210, Side::Credit, dec!(350)),
            ],
        );
    }

    #[test]
    fn test_shipment_is_one_multi_line_entry() {
        let event = BusinessEvent::Shipment {
            sales_order_id: Uuid::new_v4(),
            cogs_amount: dec!(300),
            packaging_amount: dec!(20),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (5000, Side::Debit, dec!(300)),
                (1220, Side::Credit, dec!(300)),
                (5010, Side::Debit, dec!(20)),
                (1230, Side::Credit, dec!(20)),
            ],
        );
    }

    #[test]
    fn test_shipment_without_packaging() {
        let event = BusinessEvent::Shipment {
            sales_order_id: Uuid::new_v4(),
            cogs_amount: dec!(300),
            packaging_amount: dec!(0),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (5000, Side::Debit, dec!(300)),
                (1220, Side::Credit, dec!(300)),
            ],
        );
    }

    #[test]
    fn test_scrap_pattern() {
        let event = BusinessEvent::Scrap {
            production_order_id: Uuid::new_v4(),
            amount: dec!(50),
        };
        assert_pattern(
            &event.to_draft(),
            &[
                (5020, Side::Debit, dec!(50)),
                (1210, Side::Credit, dec!(50)),
            ],
        );
    }

    #[test]
    fn test_drafts_carry_dedup_keys() {
        let po = Uuid::new_v4();
        let event = BusinessEvent::PurchaseReceipt {
            purchase_order_id: po,
            amount: dec!(10),
        };
        let draft = event.to_draft();
        let key = draft.posting_key.expect("template attaches a key");
        assert_eq!(key.source, SourceDocument::PurchaseOrder(po));
        assert_eq!(key.step, "receipt");
    }

    #[test]
    fn test_steps_distinguish_production_events() {
        let id = Uuid::new_v4();
        let issue = BusinessEvent::MaterialIssue {
            production_order_id: id,
            amount: dec!(1),
        };
        let scrap = BusinessEvent::Scrap {
            production_order_id: id,
            amount: dec!(1),
        };
        // Same document, different logical steps: distinct keys.
        assert_ne!(
            issue.to_draft().posting_key,
            scrap.to_draft().posting_key
        );
    }
}
