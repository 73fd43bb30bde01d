//! File-backed entity store.
//!
//! Five independent JSON documents, each read and rewritten as a whole.
//! There are no indices and no locking; concurrent writers race and the
//! last write wins, which is acceptable for the assumed single-operator
//! usage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain_billing::{
    model::entity::{Category, Client, Consumption, Invoice, Resource},
    repository::{
        CategoryRepo, ClientRepo, ConsumptionRepo, InvoiceRepo, ResourceRepo, StoreMaintenance,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

const RESOURCES: &str = "resources.json";
const CATEGORIES: &str = "categories.json";
const CLIENTS: &str = "clients.json";
const CONSUMPTIONS: &str = "consumptions.json";
const INVOICES: &str = "invoices.json";

const ALL_COLLECTIONS: [&str; 5] = [RESOURCES, CATEGORIES, CLIENTS, CONSUMPTIONS, INVOICES];

pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// A missing, unreadable or corrupt document loads as the empty
    /// collection; the failure is logged, never surfaced.
    async fn load<E: DeserializeOwned>(&self, name: &str) -> Vec<E> {
        let path = self.data_dir.join(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(file = %path.display(), error = %e, "collection unreadable, treated as empty");
                }
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entities) => entities,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "collection corrupt, treated as empty");
                Vec::new()
            }
        }
    }

    async fn write<E: Serialize>(&self, name: &str, entities: &[E]) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let body = serde_json::to_vec_pretty(entities)?;
        tokio::fs::write(self.data_dir.join(name), body).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceRepo for FileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Resource>> {
        Ok(self.load(RESOURCES).await)
    }

    async fn save(&self, resource: &Resource) -> anyhow::Result<()> {
        let mut stored: Vec<Resource> = self.load(RESOURCES).await;
        // Remove any existing entity with the same id, then append; a
        // re-saved entity moves to the end of the collection.
        stored.retain(|r| r.id != resource.id);
        stored.push(resource.clone());
        self.write(RESOURCES, &stored).await
    }

    async fn replace_all(&self, resources: &[Resource]) -> anyhow::Result<()> {
        self.write(RESOURCES, resources).await
    }
}

#[async_trait]
impl CategoryRepo for FileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Category>> {
        Ok(self.load(CATEGORIES).await)
    }

    async fn save(&self, category: &Category) -> anyhow::Result<()> {
        let mut stored: Vec<Category> = self.load(CATEGORIES).await;
        stored.retain(|c| c.id != category.id);
        stored.push(category.clone());
        self.write(CATEGORIES, &stored).await
    }

    async fn replace_all(&self, categories: &[Category]) -> anyhow::Result<()> {
        self.write(CATEGORIES, categories).await
    }
}

#[async_trait]
impl ClientRepo for FileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Client>> {
        Ok(self.load(CLIENTS).await)
    }

    async fn save(&self, client: &Client) -> anyhow::Result<()> {
        let mut stored: Vec<Client> = self.load(CLIENTS).await;
        stored.retain(|c| c.tax_id != client.tax_id);
        stored.push(client.clone());
        self.write(CLIENTS, &stored).await
    }

    async fn replace_all(&self, clients: &[Client]) -> anyhow::Result<()> {
        self.write(CLIENTS, clients).await
    }
}

#[async_trait]
impl ConsumptionRepo for FileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Consumption>> {
        Ok(self.load(CONSUMPTIONS).await)
    }

    async fn append(&self, consumption: &Consumption) -> anyhow::Result<()> {
        let mut stored: Vec<Consumption> = self.load(CONSUMPTIONS).await;
        stored.push(consumption.clone());
        self.write(CONSUMPTIONS, &stored).await
    }
}

#[async_trait]
impl InvoiceRepo for FileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Invoice>> {
        Ok(self.load(INVOICES).await)
    }

    async fn append(&self, invoice: &Invoice) -> anyhow::Result<()> {
        let mut stored: Vec<Invoice> = self.load(INVOICES).await;
        stored.push(invoice.clone());
        self.write(INVOICES, &stored).await
    }
}

#[async_trait]
impl StoreMaintenance for FileStore {
    async fn reset(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        for name in ALL_COLLECTIONS {
            tokio::fs::write(self.data_dir.join(name), b"[]").await?;
        }
        Ok(())
    }
}
