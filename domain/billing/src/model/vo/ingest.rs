use rust_decimal::Decimal;
use serde::Serialize;

/// Structured tally of a configuration ingestion call. Counts reflect
/// the submitted entities, not the merged collection.
#[derive(Debug, Default, Serialize)]
pub struct ConfigIngestOutcome {
    pub resources_created: usize,
    pub categories_created: usize,
    pub clients_created: usize,
    pub instances_created: usize,
    pub errors: Vec<String>,
}

impl ConfigIngestOutcome {
    /// Outcome for an envelope that could not be parsed at all: no
    /// partial effect, a single top-level error.
    pub fn fatal(reason: String) -> Self {
        Self {
            errors: vec![reason],
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ConsumptionIngestOutcome {
    pub consumptions_processed: usize,
    pub errors: Vec<String>,
}

impl ConsumptionIngestOutcome {
    pub fn fatal(reason: String) -> Self {
        Self {
            errors: vec![reason],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRunEntry {
    pub number: String,
    pub client_tax_id: String,
    pub total: Decimal,
}

/// Result of one invoice generation pass.
#[derive(Debug, Default, Serialize)]
pub struct InvoiceRun {
    pub invoices_generated: usize,
    pub details: Vec<InvoiceRunEntry>,
}
