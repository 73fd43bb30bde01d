use rust_decimal::Decimal;
use serde::Serialize;

/// Revenue accumulated by one category across all invoice detail lines
/// whose instance resolves into it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRevenueRow {
    pub category_id: i64,
    pub category_name: String,
    pub revenue: Decimal,
    /// Number of contributing invoice detail lines.
    pub billed_lines: usize,
    /// Distinct configurations of this category seen in the history.
    pub configurations_used: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationRevenueRow {
    pub configuration_id: i64,
    pub configuration_name: String,
    pub category_id: i64,
    pub revenue: Decimal,
    pub billed_lines: usize,
}

/// Category/configuration revenue breakdown, rows sorted by descending
/// revenue. `top_configurations` is a truncation of the sorted
/// configuration list.
#[derive(Debug, Default, Serialize)]
pub struct CategorySalesReport {
    pub rows: Vec<CategoryRevenueRow>,
    pub top_configurations: Vec<ConfigurationRevenueRow>,
    pub grand_total: Decimal,
}

/// Revenue re-derived for one resource from the current configuration
/// maps. May drift from the billed line totals when a map changed since
/// billing; that staleness is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRevenueRow {
    pub resource_id: i64,
    pub resource_name: String,
    pub kind: String,
    pub revenue: Decimal,
    pub hours: Decimal,
    /// Share of the grand total, in percent rounded to 2 decimals.
    pub share_pct: Decimal,
    /// `revenue / hours`, zero when no hours were billed.
    pub profitability: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceKindRow {
    pub kind: String,
    pub revenue: Decimal,
    pub share_pct: Decimal,
}

#[derive(Debug, Default, Serialize)]
pub struct ResourceSalesReport {
    pub rows: Vec<ResourceRevenueRow>,
    pub kind_totals: Vec<ResourceKindRow>,
    pub grand_total: Decimal,
}
