use std::collections::BTreeMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
    pub name: String,
    pub abbreviation: String,
    pub metric: String,
    pub kind: String,
    pub hourly_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub workload: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub tax_id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewConfiguration {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub resources: BTreeMap<i64, Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesAnalysisKind {
    Category,
    Resource,
}

/// A document written under the data directory by the rendering
/// collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub path: PathBuf,
}
