use async_trait::async_trait;

use crate::model::entity::Category;

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<Category>>;
    /// Upsert by category id: remove any existing entry, then append.
    async fn save(&self, category: &Category) -> anyhow::Result<()>;
    async fn replace_all(&self, categories: &[Category]) -> anyhow::Result<()>;
}
