use async_trait::async_trait;

use crate::model::entity::Invoice;

/// Append-only invoice history. Invoices are immutable once persisted.
#[async_trait]
pub trait InvoiceRepo: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<Invoice>>;
    async fn append(&self, invoice: &Invoice) -> anyhow::Result<()>;
}
