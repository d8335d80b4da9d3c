//! Default chart of accounts for a print-farm operation.

use once_cell::sync::Lazy;

use super::account::{AccountCode, AccountType, GlAccount};

/// Well-known account codes used by the posting templates.
pub mod codes {
    use super::AccountCode;

    /// 1000 - Cash.
    pub const CASH: AccountCode = AccountCode::known(1000);
    /// 1100 - Accounts Receivable.
    pub const ACCOUNTS_RECEIVABLE: AccountCode = AccountCode::known(1100);
    /// 1200 - Raw Materials Inventory.
    pub const RAW_MATERIALS: AccountCode = AccountCode::known(1200);
    /// 1210 - Work-in-Progress Inventory.
    pub const WORK_IN_PROGRESS: AccountCode = AccountCode::known(1210);
    /// 1220 - Finished Goods Inventory.
    pub const FINISHED_GOODS: AccountCode = AccountCode::known(1220);
    /// 1230 - Packaging Inventory.
    pub const PACKAGING: AccountCode = AccountCode::known(1230);
    /// 2000 - Accounts Payable.
    pub const ACCOUNTS_PAYABLE: AccountCode = AccountCode::known(2000);
    /// 3000 - Owner's Equity.
    pub const OWNERS_EQUITY: AccountCode = AccountCode::known(3000);
    /// 4000 - Sales Revenue.
    pub const SALES_REVENUE: AccountCode = AccountCode::known(4000);
    /// 5000 - Cost of Goods Sold.
    pub const COST_OF_GOODS_SOLD: AccountCode = AccountCode::known(5000);
    /// 5010 - Shipping Expense.
    pub const SHIPPING_EXPENSE: AccountCode = AccountCode::known(5010);
    /// 5020 - Scrap Expense.
    pub const SCRAP_EXPENSE: AccountCode = AccountCode::known(5020);
}

static DEFAULT_CHART: Lazy<Vec<GlAccount>> = Lazy::new(|| {
    let chart = [
        (codes::CASH, "Cash", AccountType::Asset),
        (
            codes::ACCOUNTS_RECEIVABLE,
            "Accounts Receivable",
            AccountType::Asset,
        ),
        (
            codes::RAW_MATERIALS,
            "Raw Materials Inventory",
            AccountType::Asset,
        ),
        (
            codes::WORK_IN_PROGRESS,
            "WIP Inventory",
            AccountType::Asset,
        ),
        (
            codes::FINISHED_GOODS,
            "Finished Goods Inventory",
            AccountType::Asset,
        ),
        (codes::PACKAGING, "Packaging Inventory", AccountType::Asset),
        (
            codes::ACCOUNTS_PAYABLE,
            "Accounts Payable",
            AccountType::Liability,
        ),
        (codes::OWNERS_EQUITY, "Owner's Equity", AccountType::Equity),
        (codes::SALES_REVENUE, "Sales Revenue", AccountType::Revenue),
        (
            codes::COST_OF_GOODS_SOLD,
            "Cost of Goods Sold",
            AccountType::Expense,
        ),
        (
            codes::SHIPPING_EXPENSE,
            "Shipping Expense",
            AccountType::Expense,
        ),
        (codes::SCRAP_EXPENSE, "Scrap Expense", AccountType::Expense),
    ];

    chart
        .into_iter()
        .map(|(code, name, account_type)| {
            GlAccount::new(code, name, account_type).expect("seed chart is well-formed")
        })
        .collect()
});

/// Returns the default seed chart of accounts, sorted by code.
#[must_use]
pub fn default_chart() -> &'static [GlAccount] {
    &DEFAULT_CHART
}
