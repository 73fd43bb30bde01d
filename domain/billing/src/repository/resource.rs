use async_trait::async_trait;

use crate::model::entity::Resource;

/// Whole-snapshot access to the resource collection. There are no
/// partial reads or indices; every read loads the entire collection.
#[async_trait]
pub trait ResourceRepo: Send + Sync {
    /// A corrupt or unreadable collection loads as empty, never an error.
    async fn load_all(&self) -> anyhow::Result<Vec<Resource>>;
    /// Upsert by id: any existing resource with the same id is removed,
    /// then the submitted one is appended at the end.
    async fn save(&self, resource: &Resource) -> anyhow::Result<()>;
    async fn replace_all(&self, resources: &[Resource]) -> anyhow::Result<()>;
}
