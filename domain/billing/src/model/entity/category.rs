use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named bundle of resource quantities defining a billable instance
/// shape. Ids are only unique within the owning category, but instance
/// references are resolved across all categories (first match wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Resource id to quantity consumed per hour of instance runtime.
    pub resources: BTreeMap<i64, Decimal>,
}

/// A grouping of configurations by workload class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub workload: String,
    pub configurations: Vec<Configuration>,
}
