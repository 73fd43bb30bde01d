use async_trait::async_trait;

use crate::model::vo::ingest::ConfigIngestOutcome;

/// Merges a submitted configuration snapshot into the stored collections
/// using replace-by-identifier semantics.
#[async_trait]
pub trait ConfigIngestService: Send + Sync {
    /// Never fails: all problems, including an unparseable envelope, are
    /// reported through the outcome's error list.
    async fn ingest(&self, payload: &str) -> ConfigIngestOutcome;
}
