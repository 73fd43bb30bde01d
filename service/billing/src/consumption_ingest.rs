use std::sync::Arc;

use async_trait::async_trait;
use domain_billing::{
    model::vo::{ingest::ConsumptionIngestOutcome, snapshot::ConsumptionSnapshot, validate},
    repository::ConsumptionRepo,
    service::ConsumptionIngestService,
};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ConsumptionIngestServiceImpl {
    consumption_repo: Arc<dyn ConsumptionRepo>,
}

#[async_trait]
impl ConsumptionIngestService for ConsumptionIngestServiceImpl {
    async fn ingest(&self, payload: &str) -> ConsumptionIngestOutcome {
        let snapshot = match ConsumptionSnapshot::parse(payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "consumption snapshot rejected");
                return ConsumptionIngestOutcome::fatal(e.to_string());
            }
        };
        let decoded = snapshot.decode();
        let mut outcome = ConsumptionIngestOutcome {
            consumptions_processed: decoded.consumptions.len(),
            errors: decoded.warnings,
        };
        for mut consumption in decoded.consumptions {
            consumption.recorded_at = validate::extract_datetime(&consumption.recorded_at);
            if let Err(e) = self.consumption_repo.append(&consumption).await {
                outcome.errors.push(format!(
                    "error recording consumption for instance {}: {e}",
                    consumption.instance_id
                ));
            }
        }
        info!(
            processed = outcome.consumptions_processed,
            errors = outcome.errors.len(),
            "consumption snapshot ingested"
        );
        outcome
    }
}
