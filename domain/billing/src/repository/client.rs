use async_trait::async_trait;

use crate::model::entity::Client;

#[async_trait]
pub trait ClientRepo: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<Client>>;
    /// Upsert by tax id: remove any existing entry, then append.
    async fn save(&self, client: &Client) -> anyhow::Result<()>;
    async fn replace_all(&self, clients: &[Client]) -> anyhow::Result<()>;
}
