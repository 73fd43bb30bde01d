//! Operations facade, one method per exposed operation. The transport
//! layer in front of this (HTTP or otherwise) is not part of the core.

mod dtos;

pub use dtos::{
    NewCategory, NewClient, NewConfiguration, NewResource, RenderedDocument, SalesAnalysisKind,
};

use std::path::PathBuf;
use std::sync::Arc;

use domain_billing::{
    exception::{BillingException, BillingResult},
    model::{
        entity::{Category, Client, Configuration, Consumption, Invoice, Resource},
        vo::{
            ingest::{ConfigIngestOutcome, ConsumptionIngestOutcome, InvoiceRun},
            validate,
        },
    },
};
use tracing::info;

use crate::infrastructure::{config::AppConfig, ServiceProvider};

pub struct BillingAdmin {
    provider: Arc<ServiceProvider>,
}

impl BillingAdmin {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            provider: Arc::new(ServiceProvider::new(config)),
        }
    }

    pub async fn reset_system(&self) -> anyhow::Result<()> {
        self.provider.store_maintenance().reset().await?;
        info!("system reset, all collections cleared");
        Ok(())
    }

    pub async fn ingest_configuration(&self, payload: &str) -> ConfigIngestOutcome {
        self.provider.config_ingest_service().ingest(payload).await
    }

    pub async fn ingest_consumption(&self, payload: &str) -> ConsumptionIngestOutcome {
        self.provider.consumption_ingest_service().ingest(payload).await
    }

    pub async fn generate_invoices(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> anyhow::Result<InvoiceRun> {
        self.provider.invoice_service().generate(period_start, period_end).await
    }

    /// Renders the invoice document, or `None` when no invoice carries
    /// the given number.
    pub async fn invoice_report(&self, number: &str) -> anyhow::Result<Option<RenderedDocument>> {
        let invoices = self.provider.invoice_repo().load_all().await?;
        let Some(invoice) = invoices.iter().find(|i| i.number == number) else {
            return Ok(None);
        };
        let content = self.provider.document_renderer().invoice_document(invoice);
        let path = self.write_document(&format!("invoice_{number}.txt"), &content).await?;
        Ok(Some(RenderedDocument { path }))
    }

    pub async fn sales_analysis(
        &self,
        kind: SalesAnalysisKind,
        period_start: &str,
        period_end: &str,
    ) -> anyhow::Result<RenderedDocument> {
        let renderer = self.provider.document_renderer();
        let reports = self.provider.sales_report_service();
        let (stem, content) = match kind {
            SalesAnalysisKind::Category => {
                let report = reports.category_breakdown().await?;
                (
                    "sales_categories",
                    renderer.category_analysis(&report, period_start, period_end),
                )
            }
            SalesAnalysisKind::Resource => {
                let report = reports.resource_breakdown().await?;
                (
                    "sales_resources",
                    renderer.resource_analysis(&report, period_start, period_end),
                )
            }
        };
        let file_name = format!(
            "{stem}_{}_{}.txt",
            sanitize(period_start),
            sanitize(period_end)
        );
        let path = self.write_document(&file_name, &content).await?;
        Ok(RenderedDocument { path })
    }

    pub async fn query_resources(&self) -> anyhow::Result<Vec<Resource>> {
        self.provider.resource_repo().load_all().await
    }

    pub async fn query_categories(&self) -> anyhow::Result<Vec<Category>> {
        self.provider.category_repo().load_all().await
    }

    pub async fn query_clients(&self) -> anyhow::Result<Vec<Client>> {
        self.provider.client_repo().load_all().await
    }

    pub async fn query_consumptions(&self) -> anyhow::Result<Vec<Consumption>> {
        self.provider.consumption_repo().load_all().await
    }

    pub async fn query_invoices(&self) -> anyhow::Result<Vec<Invoice>> {
        self.provider.invoice_repo().load_all().await
    }

    pub async fn create_resource(&self, fields: NewResource) -> anyhow::Result<i64> {
        let repo = self.provider.resource_repo();
        let id = next_id(repo.load_all().await?.iter().map(|r| r.id));
        repo.save(&Resource {
            id,
            name: fields.name,
            abbreviation: fields.abbreviation,
            metric: fields.metric,
            kind: fields.kind,
            hourly_price: fields.hourly_price,
        })
        .await?;
        Ok(id)
    }

    pub async fn create_category(&self, fields: NewCategory) -> anyhow::Result<i64> {
        let repo = self.provider.category_repo();
        let id = next_id(repo.load_all().await?.iter().map(|c| c.id));
        repo.save(&Category {
            id,
            name: fields.name,
            description: fields.description,
            workload: fields.workload,
            configurations: Vec::new(),
        })
        .await?;
        Ok(id)
    }

    pub async fn create_client(&self, fields: NewClient) -> BillingResult<()> {
        if !validate::is_valid_tax_id(&fields.tax_id) {
            return Err(BillingException::InvalidTaxId {
                tax_id: fields.tax_id,
            });
        }
        self.provider
            .client_repo()
            .save(&Client {
                tax_id: fields.tax_id,
                name: fields.name,
                username: fields.username,
                password: fields.password,
                address: fields.address,
                email: fields.email,
                instances: Vec::new(),
            })
            .await?;
        Ok(())
    }

    pub async fn create_configuration(
        &self,
        category_id: i64,
        fields: NewConfiguration,
    ) -> BillingResult<i64> {
        let repo = self.provider.category_repo();
        let categories = repo.load_all().await?;
        // Configuration references are resolved across all categories at
        // rating time, so the new id must not collide anywhere.
        let id = next_id(
            categories
                .iter()
                .flat_map(|c| c.configurations.iter())
                .map(|c| c.id),
        );
        let mut category = categories
            .into_iter()
            .find(|c| c.id == category_id)
            .ok_or(BillingException::UnknownCategory { id: category_id })?;
        category.configurations.push(Configuration {
            id,
            name: fields.name,
            description: fields.description,
            resources: fields.resources,
        });
        repo.save(&category).await?;
        Ok(id)
    }

    async fn write_document(&self, file_name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.provider.data_dir().join(file_name);
        tokio::fs::create_dir_all(self.provider.data_dir()).await?;
        tokio::fs::write(&path, content).await?;
        info!(path = %path.display(), "document rendered");
        Ok(path)
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

fn sanitize(period: &str) -> String {
    period.replace(['/', ' ', ':'], "-")
}
