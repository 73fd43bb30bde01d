use async_trait::async_trait;

use crate::model::vo::ingest::ConsumptionIngestOutcome;

/// Validates and appends consumption events.
#[async_trait]
pub trait ConsumptionIngestService: Send + Sync {
    async fn ingest(&self, payload: &str) -> ConsumptionIngestOutcome;
}
