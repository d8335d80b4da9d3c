//! PrintFarm GL walkthrough.
//!
//! Seeds the chart of accounts and a fiscal calendar, replays a day of
//! print-farm business events, then prints the trial balance and the
//! inventory reconciliation.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use printfarm_core::accounts::codes;
use printfarm_core::ledger::events::BusinessEvent;
use printfarm_core::ledger::types::{EntryDraft, LineInput};
use printfarm_core::ledger::entry::SourceDocument;
use printfarm_core::reconcile::InventoryCategory;
use printfarm_shared::AppConfig;
use printfarm_shared::types::UserId;
use printfarm_store::{GeneralLedger, InventoryError, PhysicalInventory};

/// Stand-in for the inventory subsystem: physical counts that happen to be
/// a little short on raw materials.
struct ShelfCount;

#[async_trait]
impl PhysicalInventory for ShelfCount {
    async fn physical_valuation(
        &self,
        category: InventoryCategory,
        _as_of: NaiveDate,
    ) -> Result<Decimal, InventoryError> {
        Ok(match category {
            InventoryCategory::RawMaterials => dec!(560.00),
            InventoryCategory::WorkInProgress => dec!(50.00),
            InventoryCategory::FinishedGoods => Decimal::ZERO,
            InventoryCategory::Packaging => dec!(85.00),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printfarm=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");
    info!(
        require_entries_on_close = config.ledger.require_entries_on_close,
        "configuration loaded"
    );

    let ledger = GeneralLedger::with_default_chart(config.ledger.clone());
    let accountant = UserId::new();

    // Fiscal calendar for the configured year.
    let start = config.demo.fiscal_year_start;
    let end = NaiveDate::from_ymd_opt(start.year(), 12, 31).expect("valid year end");
    let periods = ledger.add_monthly_periods(start, end).await?;
    info!(periods = periods.len(), "fiscal calendar seeded");

    // Opening balance.
    let today = Utc::now().date_naive();
    ledger
        .post(
            EntryDraft::new(
                SourceDocument::ManualAdjustment(Uuid::new_v4()),
                "Opening balance",
                vec![
                    LineInput::debit(codes::CASH, config.demo.opening_cash),
                    LineInput::credit(codes::OWNERS_EQUITY, config.demo.opening_cash),
                ],
            )
            .at(today.and_hms_opt(8, 0, 0).expect("valid time").and_utc()),
        )
        .await?;

    // Stock the packing bench.
    ledger
        .post(EntryDraft::new(
            SourceDocument::ManualAdjustment(Uuid::new_v4()),
            "Packaging stock purchase",
            vec![
                LineInput::debit(codes::PACKAGING, dec!(100.00)),
                LineInput::credit(codes::CASH, dec!(100.00)),
            ],
        ))
        .await?;

    // A day on the farm.
    let production_order = Uuid::new_v4();
    let events = [
        BusinessEvent::PurchaseReceipt {
            purchase_order_id: Uuid::new_v4(),
            amount: dec!(1000.00),
        },
        BusinessEvent::MaterialIssue {
            production_order_id: production_order,
            amount: dec!(400.00),
        },
        BusinessEvent::ProductionQcPass {
            production_order_id: production_order,
            amount: dec!(350.00),
        },
        BusinessEvent::Shipment {
            sales_order_id: Uuid::new_v4(),
            cogs_amount: dec!(350.00),
            packaging_amount: dec!(15.00),
        },
        BusinessEvent::Scrap {
            production_order_id: production_order,
            amount: dec!(50.00),
        },
    ];
    for event in events {
        let entry = ledger.post(event.to_draft()).await?;
        info!(entry_id = %entry.id, description = %entry.description, "posted");
    }

    // Trial balance.
    let report = ledger.trial_balance(today).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    anyhow::ensure!(report.totals.is_balanced, "books out of balance");

    // Raw-materials ledger with running balances.
    let raw = ledger
        .account_ledger(codes::RAW_MATERIALS, today, today)
        .await?;
    for row in raw.rows() {
        println!(
            "{}  {:<34} DR {:>10}  CR {:>10}  balance {:>10}",
            row.posted_at.date_naive(),
            row.description,
            row.debit,
            row.credit,
            row.running_balance
        );
    }

    // Reconcile the shelf count against the books.
    let snapshots = ledger.reconcile_inventory(today, &ShelfCount).await?;
    for snapshot in &snapshots {
        println!(
            "{:<16} GL {:>10}  physical {:>10}  variance {:>10}",
            snapshot.category.to_string(),
            snapshot.gl_balance,
            snapshot.physical_value,
            snapshot.variance
        );
    }

    // Month-end: close the current period.
    let period = ledger
        .period_for_date(today)
        .await
        .expect("calendar covers today");
    ledger.close_period(period.id, accountant).await?;
    info!(period = %period.name, "period closed");

    Ok(())
}
