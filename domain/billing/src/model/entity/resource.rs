use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billable unit type (e.g. CPU-hour, GB of storage) with an hourly
/// unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    /// Unit-of-measure label.
    pub metric: String,
    /// Free-text workload tag, used by the resource revenue report.
    pub kind: String,
    pub hourly_price: Decimal,
}
