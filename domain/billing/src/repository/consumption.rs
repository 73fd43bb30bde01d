use async_trait::async_trait;

use crate::model::entity::Consumption;

/// Append-only log of usage events. Records are never merged, replaced
/// or deleted short of a full store reset.
#[async_trait]
pub trait ConsumptionRepo: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<Consumption>>;
    async fn append(&self, consumption: &Consumption) -> anyhow::Result<()>;
}
