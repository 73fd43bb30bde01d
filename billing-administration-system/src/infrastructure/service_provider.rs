use std::path::Path;
use std::sync::Arc;

use domain_billing::{
    repository::{
        CategoryRepo, ClientRepo, ConsumptionRepo, InvoiceRepo, ResourceRepo, StoreMaintenance,
    },
    service::{
        ConfigIngestService, ConsumptionIngestService, DocumentRenderer, InvoiceService,
        RatingService, SalesReportService,
    },
};
use service_billing::{
    ConfigIngestServiceImpl, ConsumptionIngestServiceImpl, InvoiceServiceImpl, RatingServiceImpl,
    SalesReportServiceImpl,
};

use super::config::AppConfig;
use super::render::TextDocumentRenderer;
use super::repository::FileStore;

/// Wires the file store into the service graph. Every service sees the
/// same store; there is no per-call state.
pub struct ServiceProvider {
    store: Arc<FileStore>,
    config_ingest_service: Arc<dyn ConfigIngestService>,
    consumption_ingest_service: Arc<dyn ConsumptionIngestService>,
    rating_service: Arc<dyn RatingService>,
    invoice_service: Arc<dyn InvoiceService>,
    sales_report_service: Arc<dyn SalesReportService>,
    document_renderer: Arc<dyn DocumentRenderer>,
}

impl ServiceProvider {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(FileStore::new(&config.data_dir));

        let config_ingest_service = Arc::new(
            ConfigIngestServiceImpl::builder()
                .resource_repo(store.clone())
                .category_repo(store.clone())
                .client_repo(store.clone())
                .build(),
        );
        let consumption_ingest_service = Arc::new(
            ConsumptionIngestServiceImpl::builder()
                .consumption_repo(store.clone())
                .build(),
        );
        let rating_service: Arc<dyn RatingService> = Arc::new(
            RatingServiceImpl::builder()
                .client_repo(store.clone())
                .category_repo(store.clone())
                .resource_repo(store.clone())
                .build(),
        );
        let invoice_service = Arc::new(
            InvoiceServiceImpl::builder()
                .consumption_repo(store.clone())
                .client_repo(store.clone())
                .invoice_repo(store.clone())
                .rating_service(rating_service.clone())
                .build(),
        );
        let sales_report_service = Arc::new(
            SalesReportServiceImpl::builder()
                .invoice_repo(store.clone())
                .client_repo(store.clone())
                .category_repo(store.clone())
                .resource_repo(store.clone())
                .build(),
        );

        Self {
            store,
            config_ingest_service,
            consumption_ingest_service,
            rating_service,
            invoice_service,
            sales_report_service,
            document_renderer: Arc::new(TextDocumentRenderer),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.store.data_dir()
    }

    pub fn resource_repo(&self) -> Arc<dyn ResourceRepo> {
        self.store.clone()
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepo> {
        self.store.clone()
    }

    pub fn client_repo(&self) -> Arc<dyn ClientRepo> {
        self.store.clone()
    }

    pub fn consumption_repo(&self) -> Arc<dyn ConsumptionRepo> {
        self.store.clone()
    }

    pub fn invoice_repo(&self) -> Arc<dyn InvoiceRepo> {
        self.store.clone()
    }

    pub fn store_maintenance(&self) -> Arc<dyn StoreMaintenance> {
        self.store.clone()
    }

    pub fn config_ingest_service(&self) -> Arc<dyn ConfigIngestService> {
        self.config_ingest_service.clone()
    }

    pub fn consumption_ingest_service(&self) -> Arc<dyn ConsumptionIngestService> {
        self.consumption_ingest_service.clone()
    }

    pub fn rating_service(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    pub fn invoice_service(&self) -> Arc<dyn InvoiceService> {
        self.invoice_service.clone()
    }

    pub fn sales_report_service(&self) -> Arc<dyn SalesReportService> {
        self.sales_report_service.clone()
    }

    pub fn document_renderer(&self) -> Arc<dyn DocumentRenderer> {
        self.document_renderer.clone()
    }
}
