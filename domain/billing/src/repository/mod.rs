mod category;
mod client;
mod consumption;
mod invoice;
mod resource;

#[rustfmt::skip]
pub use {
    category::CategoryRepo,
    client::ClientRepo,
    consumption::ConsumptionRepo,
    invoice::InvoiceRepo,
    resource::ResourceRepo,
};

use async_trait::async_trait;

/// Whole-store administration. `reset` clears all five collections to
/// empty, re-initialized containers.
#[async_trait]
pub trait StoreMaintenance: Send + Sync {
    async fn reset(&self) -> anyhow::Result<()>;
}
