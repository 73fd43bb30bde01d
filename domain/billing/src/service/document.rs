use crate::model::entity::Invoice;
use crate::model::vo::report::{CategorySalesReport, ResourceSalesReport};

/// External document-rendering collaborator. Layout concerns stay behind
/// this seam; the core only hands over resolved data.
pub trait DocumentRenderer: Send + Sync {
    fn invoice_document(&self, invoice: &Invoice) -> String;
    fn category_analysis(
        &self,
        report: &CategorySalesReport,
        period_start: &str,
        period_end: &str,
    ) -> String;
    fn resource_analysis(
        &self,
        report: &ResourceSalesReport,
        period_start: &str,
        period_end: &str,
    ) -> String;
}
