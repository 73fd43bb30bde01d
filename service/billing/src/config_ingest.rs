use std::sync::Arc;

use async_trait::async_trait;
use domain_billing::{
    model::{
        entity::{Category, Client, Resource},
        vo::{ingest::ConfigIngestOutcome, snapshot::ConfigSnapshot, validate},
    },
    repository::{CategoryRepo, ClientRepo, ResourceRepo},
    service::ConfigIngestService,
};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ConfigIngestServiceImpl {
    resource_repo: Arc<dyn ResourceRepo>,
    category_repo: Arc<dyn CategoryRepo>,
    client_repo: Arc<dyn ClientRepo>,
}

#[async_trait]
impl ConfigIngestService for ConfigIngestServiceImpl {
    async fn ingest(&self, payload: &str) -> ConfigIngestOutcome {
        let snapshot = match ConfigSnapshot::parse(payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "configuration snapshot rejected");
                return ConfigIngestOutcome::fatal(e.to_string());
            }
        };
        let decoded = snapshot.decode();
        // Counts reflect the submitted entities, before merging and
        // before tax-id validation.
        let mut outcome = ConfigIngestOutcome {
            resources_created: decoded.resources.len(),
            categories_created: decoded.categories.len(),
            clients_created: decoded.clients.len(),
            instances_created: decoded.clients.iter().map(|c| c.instances.len()).sum(),
            errors: decoded.warnings,
        };

        if let Err(e) = self.merge_resources(decoded.resources).await {
            outcome.errors.push(format!("error saving resources: {e}"));
        }
        if let Err(e) = self.merge_categories(decoded.categories).await {
            outcome.errors.push(format!("error saving categories: {e}"));
        }
        if let Err(e) = self.merge_clients(decoded.clients, &mut outcome.errors).await {
            outcome.errors.push(format!("error saving clients: {e}"));
        }

        info!(
            resources = outcome.resources_created,
            categories = outcome.categories_created,
            clients = outcome.clients_created,
            instances = outcome.instances_created,
            errors = outcome.errors.len(),
            "configuration snapshot ingested"
        );
        outcome
    }
}

impl ConfigIngestServiceImpl {
    async fn merge_resources(&self, submitted: Vec<Resource>) -> anyhow::Result<()> {
        if submitted.is_empty() {
            return Ok(());
        }
        let mut stored = self.resource_repo.load_all().await?;
        for resource in submitted {
            // Replace in place, preserving position; append otherwise.
            match stored.iter_mut().find(|r| r.id == resource.id) {
                Some(slot) => *slot = resource,
                None => stored.push(resource),
            }
        }
        self.resource_repo.replace_all(&stored).await
    }

    async fn merge_categories(&self, submitted: Vec<Category>) -> anyhow::Result<()> {
        if submitted.is_empty() {
            return Ok(());
        }
        let mut stored = self.category_repo.load_all().await?;
        for category in submitted {
            match stored.iter_mut().find(|c| c.id == category.id) {
                Some(slot) => *slot = category,
                None => stored.push(category),
            }
        }
        self.category_repo.replace_all(&stored).await
    }

    async fn merge_clients(
        &self,
        submitted: Vec<Client>,
        errors: &mut Vec<String>,
    ) -> anyhow::Result<()> {
        let mut accepted = Vec::new();
        for mut client in submitted {
            if !validate::is_valid_tax_id(&client.tax_id) {
                warn!(tax_id = %client.tax_id, "client rejected: invalid tax id");
                errors.push(format!("invalid tax id: {}", client.tax_id));
                continue;
            }
            for instance in &mut client.instances {
                instance.started_at = validate::extract_date(&instance.started_at);
                if let Some(ended_at) = instance.ended_at.take() {
                    instance.ended_at = Some(validate::extract_date(&ended_at));
                }
            }
            accepted.push(client);
        }
        if accepted.is_empty() {
            return Ok(());
        }
        let mut stored = self.client_repo.load_all().await?;
        for client in accepted {
            match stored.iter_mut().find(|c| c.tax_id == client.tax_id) {
                Some(slot) => *slot = client,
                None => stored.push(client),
            }
        }
        self.client_repo.replace_all(&stored).await
    }
}
