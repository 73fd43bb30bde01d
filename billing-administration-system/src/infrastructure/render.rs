use std::fmt::Write as _;

use domain_billing::model::entity::Invoice;
use domain_billing::model::vo::report::{CategorySalesReport, ResourceSalesReport};
use domain_billing::service::DocumentRenderer;

const COMPANY: &str = "Tecnologías Chapinas, S.A.";

/// Plain-text stand-in for the PDF rendering collaborator. Produces the
/// same content blocks: masthead, document header, info table, detail
/// table.
#[derive(Default)]
pub struct TextDocumentRenderer;

impl DocumentRenderer for TextDocumentRenderer {
    fn invoice_document(&self, invoice: &Invoice) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, "{COMPANY}");
        let _ = writeln!(doc, "Invoice Detail");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "Invoice number: {}", invoice.number);
        let _ = writeln!(doc, "Client tax id:  {}", invoice.client_tax_id);
        let _ = writeln!(doc, "Issue date:     {}", invoice.issued_at);
        let _ = writeln!(doc, "Total amount:   Q {:.2}", invoice.total);
        let _ = writeln!(doc);
        let _ = writeln!(doc, "{:<12} {:>14} {:>12}", "Instance", "Hours", "Amount");
        for detail in &invoice.details {
            let _ = writeln!(
                doc,
                "{:<12} {:>14.2} {:>12.2}",
                detail.instance_id, detail.hours, detail.amount
            );
        }
        doc
    }

    fn category_analysis(
        &self,
        report: &CategorySalesReport,
        period_start: &str,
        period_end: &str,
    ) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, "{COMPANY}");
        let _ = writeln!(doc, "Sales Analysis by Category");
        let _ = writeln!(doc, "Period: {period_start} to {period_end}");
        let _ = writeln!(doc);
        let _ = writeln!(
            doc,
            "{:<24} {:>12} {:>8} {:>14}",
            "Category", "Revenue", "Lines", "Configurations"
        );
        for row in &report.rows {
            let _ = writeln!(
                doc,
                "{:<24} {:>12.2} {:>8} {:>14}",
                row.category_name, row.revenue, row.billed_lines, row.configurations_used
            );
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "Top configurations");
        for row in &report.top_configurations {
            let _ = writeln!(
                doc,
                "{:<24} {:>12.2}",
                row.configuration_name, row.revenue
            );
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "Grand total: Q {:.2}", report.grand_total);
        doc
    }

    fn resource_analysis(
        &self,
        report: &ResourceSalesReport,
        period_start: &str,
        period_end: &str,
    ) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, "{COMPANY}");
        let _ = writeln!(doc, "Sales Analysis by Resource");
        let _ = writeln!(doc, "Period: {period_start} to {period_end}");
        let _ = writeln!(doc);
        let _ = writeln!(
            doc,
            "{:<24} {:<12} {:>12} {:>10} {:>8} {:>12}",
            "Resource", "Kind", "Revenue", "Hours", "Share", "Rev/Hour"
        );
        for row in &report.rows {
            let _ = writeln!(
                doc,
                "{:<24} {:<12} {:>12.2} {:>10.2} {:>7.2}% {:>12.2}",
                row.resource_name, row.kind, row.revenue, row.hours, row.share_pct,
                row.profitability
            );
        }
        let _ = writeln!(doc);
        for row in &report.kind_totals {
            let _ = writeln!(doc, "{:<24} {:>12.2} {:>7.2}%", row.kind, row.revenue, row.share_pct);
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "Grand total: Q {:.2}", report.grand_total);
        doc
    }
}
