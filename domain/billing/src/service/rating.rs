use async_trait::async_trait;
use rust_decimal::Decimal;

/// Converts accumulated consumption into a monetary amount by resolving
/// the instance → configuration → resource-quantity chain.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Cost of `hours` of runtime for the given instance, rounded to two
    /// decimal places. Lookup misses rate to zero, never an error.
    async fn instance_cost(&self, instance_id: i64, hours: Decimal) -> anyhow::Result<Decimal>;
}
