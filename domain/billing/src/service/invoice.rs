use async_trait::async_trait;

use crate::model::vo::ingest::InvoiceRun;

#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Bills all stored consumption, one invoice per client with a
    /// positive total. The period bounds only stamp the issue date; they
    /// do not filter which consumption records are included.
    async fn generate(&self, period_start: &str, period_end: &str)
        -> anyhow::Result<InvoiceRun>;
}
