use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain_billing::{
    model::{
        entity::{Category, Client, Configuration},
        vo::report::{
            CategoryRevenueRow, CategorySalesReport, ConfigurationRevenueRow, ResourceKindRow,
            ResourceRevenueRow, ResourceSalesReport,
        },
    },
    repository::{CategoryRepo, ClientRepo, InvoiceRepo, ResourceRepo},
    service::SalesReportService,
};
use rust_decimal::Decimal;
use tracing::warn;
use typed_builder::TypedBuilder;

const TOP_CONFIGURATIONS: usize = 10;

#[derive(TypedBuilder)]
pub struct SalesReportServiceImpl {
    invoice_repo: Arc<dyn InvoiceRepo>,
    client_repo: Arc<dyn ClientRepo>,
    category_repo: Arc<dyn CategoryRepo>,
    resource_repo: Arc<dyn ResourceRepo>,
}

/// Instance → configuration → category, resolved the same way the rating
/// engine resolves it: first instance match across all clients, first
/// configuration match across all categories.
fn resolve_configuration<'a>(
    instance_id: i64,
    clients: &[Client],
    categories: &'a [Category],
) -> Option<(&'a Category, &'a Configuration)> {
    let configuration_id = clients
        .iter()
        .flat_map(|client| client.instances.iter())
        .find(|instance| instance.id == instance_id)
        .map(|instance| instance.configuration_id)?;
    categories.iter().find_map(|category| {
        category
            .configurations
            .iter()
            .find(|configuration| configuration.id == configuration_id)
            .map(|configuration| (category, configuration))
    })
}

fn share_pct(revenue: Decimal, grand_total: Decimal) -> Decimal {
    if grand_total.is_zero() {
        Decimal::ZERO
    } else {
        (revenue / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[async_trait]
impl SalesReportService for SalesReportServiceImpl {
    async fn category_breakdown(&self) -> anyhow::Result<CategorySalesReport> {
        let invoices = self.invoice_repo.load_all().await?;
        let clients = self.client_repo.load_all().await?;
        let categories = self.category_repo.load_all().await?;

        struct CategoryAcc {
            category_id: i64,
            category_name: String,
            revenue: Decimal,
            billed_lines: usize,
            configurations_used: HashSet<i64>,
        }
        let mut category_accs: Vec<CategoryAcc> = Vec::new();
        let mut configuration_rows: Vec<ConfigurationRevenueRow> = Vec::new();
        let mut grand_total = Decimal::ZERO;

        for invoice in &invoices {
            for detail in &invoice.details {
                let Some((category, configuration)) =
                    resolve_configuration(detail.instance_id, &clients, &categories)
                else {
                    warn!(
                        instance_id = detail.instance_id,
                        "sales report: detail line does not resolve to a configuration"
                    );
                    continue;
                };
                grand_total += detail.amount;

                match category_accs.iter_mut().find(|acc| acc.category_id == category.id) {
                    Some(acc) => {
                        acc.revenue += detail.amount;
                        acc.billed_lines += 1;
                        acc.configurations_used.insert(configuration.id);
                    }
                    None => category_accs.push(CategoryAcc {
                        category_id: category.id,
                        category_name: category.name.clone(),
                        revenue: detail.amount,
                        billed_lines: 1,
                        configurations_used: HashSet::from([configuration.id]),
                    }),
                }
                match configuration_rows
                    .iter_mut()
                    .find(|row| row.configuration_id == configuration.id)
                {
                    Some(row) => {
                        row.revenue += detail.amount;
                        row.billed_lines += 1;
                    }
                    None => configuration_rows.push(ConfigurationRevenueRow {
                        configuration_id: configuration.id,
                        configuration_name: configuration.name.clone(),
                        category_id: category.id,
                        revenue: detail.amount,
                        billed_lines: 1,
                    }),
                }
            }
        }

        let mut rows: Vec<CategoryRevenueRow> = category_accs
            .into_iter()
            .map(|acc| CategoryRevenueRow {
                category_id: acc.category_id,
                category_name: acc.category_name,
                revenue: acc.revenue,
                billed_lines: acc.billed_lines,
                configurations_used: acc.configurations_used.len(),
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        configuration_rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        configuration_rows.truncate(TOP_CONFIGURATIONS);

        Ok(CategorySalesReport {
            rows,
            top_configurations: configuration_rows,
            grand_total,
        })
    }

    async fn resource_breakdown(&self) -> anyhow::Result<ResourceSalesReport> {
        let invoices = self.invoice_repo.load_all().await?;
        let clients = self.client_repo.load_all().await?;
        let categories = self.category_repo.load_all().await?;
        let resources = self.resource_repo.load_all().await?;

        struct ResourceAcc {
            resource_id: i64,
            resource_name: String,
            kind: String,
            revenue: Decimal,
            hours: Decimal,
        }
        let mut resource_accs: Vec<ResourceAcc> = Vec::new();
        let mut grand_total = Decimal::ZERO;

        for invoice in &invoices {
            for detail in &invoice.details {
                let Some((_, configuration)) =
                    resolve_configuration(detail.instance_id, &clients, &categories)
                else {
                    continue;
                };
                for (resource_id, quantity) in &configuration.resources {
                    let Some(resource) = resources.iter().find(|r| r.id == *resource_id) else {
                        continue;
                    };
                    // Re-derived from the current map and price, not from
                    // the billed line amount; drift since billing is
                    // accepted staleness.
                    let contribution = *quantity * resource.hourly_price * detail.hours;
                    grand_total += contribution;
                    match resource_accs.iter_mut().find(|acc| acc.resource_id == resource.id) {
                        Some(acc) => {
                            acc.revenue += contribution;
                            acc.hours += detail.hours;
                        }
                        None => resource_accs.push(ResourceAcc {
                            resource_id: resource.id,
                            resource_name: resource.name.clone(),
                            kind: resource.kind.clone(),
                            revenue: contribution,
                            hours: detail.hours,
                        }),
                    }
                }
            }
        }

        let mut kind_totals: Vec<ResourceKindRow> = Vec::new();
        let mut rows: Vec<ResourceRevenueRow> = Vec::new();
        for acc in resource_accs {
            match kind_totals.iter_mut().find(|row| row.kind == acc.kind) {
                Some(row) => row.revenue += acc.revenue,
                None => kind_totals.push(ResourceKindRow {
                    kind: acc.kind.clone(),
                    revenue: acc.revenue,
                    share_pct: Decimal::ZERO,
                }),
            }
            let profitability = if acc.hours.is_zero() {
                Decimal::ZERO
            } else {
                (acc.revenue / acc.hours).round_dp(2)
            };
            rows.push(ResourceRevenueRow {
                resource_id: acc.resource_id,
                resource_name: acc.resource_name,
                kind: acc.kind,
                revenue: acc.revenue.round_dp(2),
                hours: acc.hours,
                share_pct: share_pct(acc.revenue, grand_total),
                profitability,
            });
        }
        for row in &mut kind_totals {
            row.share_pct = share_pct(row.revenue, grand_total);
            row.revenue = row.revenue.round_dp(2);
        }
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        kind_totals.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        Ok(ResourceSalesReport {
            rows,
            kind_totals,
            grand_total: grand_total.round_dp(2),
        })
    }
}
