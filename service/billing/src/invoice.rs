use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use domain_billing::{
    model::{
        entity::{Consumption, Invoice, InvoiceDetail},
        vo::{
            ingest::{InvoiceRun, InvoiceRunEntry},
            validate,
        },
    },
    repository::{ClientRepo, ConsumptionRepo, InvoiceRepo},
    service::{InvoiceService, RatingService},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct InvoiceServiceImpl {
    consumption_repo: Arc<dyn ConsumptionRepo>,
    client_repo: Arc<dyn ClientRepo>,
    invoice_repo: Arc<dyn InvoiceRepo>,
    rating_service: Arc<dyn RatingService>,
}

#[async_trait]
impl InvoiceService for InvoiceServiceImpl {
    async fn generate(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> anyhow::Result<InvoiceRun> {
        // The period only stamps the issue date. Nothing marks billed
        // consumption, so every run re-bills all stored history; callers
        // rely on this until period filtering becomes a requirement.
        info!(period_start, period_end, "generating invoices");
        let consumptions = self.consumption_repo.load_all().await?;
        let clients = self.client_repo.load_all().await?;
        let issued_at = validate::normalize_issue_date(period_end);

        let mut run = InvoiceRun::default();
        for (tax_id, client_consumptions) in group_by_client(&consumptions) {
            if !clients.iter().any(|client| client.tax_id == tax_id) {
                warn!(tax_id = %tax_id, "skipping consumption with no matching client");
                continue;
            }
            let mut total = Decimal::ZERO;
            let mut details = Vec::new();
            for (instance_id, hours) in sum_hours_by_instance(&client_consumptions) {
                let amount = self.rating_service.instance_cost(instance_id, hours).await?;
                total += amount;
                details.push(InvoiceDetail {
                    instance_id,
                    hours,
                    amount,
                });
            }
            if total <= Decimal::ZERO {
                // Zero-total clients produce no invoice; not an error.
                continue;
            }
            let number = invoice_number(&tax_id);
            let invoice = Invoice {
                number: number.clone(),
                client_tax_id: tax_id.clone(),
                issued_at: issued_at.clone(),
                total,
                details,
            };
            self.invoice_repo.append(&invoice).await?;
            info!(number = %number, total = %total, "invoice persisted");
            run.details.push(InvoiceRunEntry {
                number,
                client_tax_id: tax_id,
                total,
            });
        }
        run.invoices_generated = run.details.len();
        Ok(run)
    }
}

/// `INV-<YYYYMMDDHHMMSS>-<first 4 digits of the tax id, hyphens removed>`.
/// The tax-id suffix keeps numbers issued in the same second unique per
/// client.
fn invoice_number(tax_id: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let digits: String = tax_id.chars().filter(|c| *c != '-').take(4).collect();
    format!("INV-{timestamp}-{digits}")
}

/// Group in first-seen order; summation order is irrelevant.
fn group_by_client(consumptions: &[Consumption]) -> Vec<(String, Vec<&Consumption>)> {
    let mut groups: Vec<(String, Vec<&Consumption>)> = Vec::new();
    for consumption in consumptions {
        match groups.iter_mut().find(|(tax_id, _)| *tax_id == consumption.client_tax_id) {
            Some((_, group)) => group.push(consumption),
            None => groups.push((consumption.client_tax_id.clone(), vec![consumption])),
        }
    }
    groups
}

fn sum_hours_by_instance(consumptions: &[&Consumption]) -> Vec<(i64, Decimal)> {
    let mut totals: Vec<(i64, Decimal)> = Vec::new();
    for consumption in consumptions {
        match totals.iter_mut().find(|(id, _)| *id == consumption.instance_id) {
            Some((_, hours)) => *hours += consumption.hours,
            None => totals.push((consumption.instance_id, consumption.hours)),
        }
    }
    totals
}
