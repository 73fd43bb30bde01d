use async_trait::async_trait;

use crate::model::vo::report::{CategorySalesReport, ResourceSalesReport};

/// Read-only revenue breakdowns derived from the invoice history joined
/// against the current configuration data.
#[async_trait]
pub trait SalesReportService: Send + Sync {
    async fn category_breakdown(&self) -> anyhow::Result<CategorySalesReport>;
    async fn resource_breakdown(&self) -> anyhow::Result<ResourceSalesReport>;
}
