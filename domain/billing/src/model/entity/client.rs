use serde::{Deserialize, Serialize};

/// A client's running allocation of a configuration. The configuration
/// reference is resolved at rating time, not validated on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: i64,
    pub configuration_id: i64,
    pub name: String,
    /// Free-form start timestamp, normalized to `DD/MM/YYYY` on ingestion
    /// when such a literal is present.
    pub started_at: String,
    pub status: String,
    pub ended_at: Option<String>,
}

/// A billed customer, keyed by tax id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub tax_id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub address: String,
    pub email: String,
    pub instances: Vec<Instance>,
}
