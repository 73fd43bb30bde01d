use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded usage-time event for an instance. Records are append-only
/// and additive: multiple records for the same (client, instance) pair
/// sum at invoice time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub client_tax_id: String,
    pub instance_id: i64,
    /// Elapsed hours, never negative.
    pub hours: Decimal,
    pub recorded_at: String,
}
