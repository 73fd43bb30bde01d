mod config_ingest;
mod consumption_ingest;
mod document;
mod invoice;
mod rating;
mod report;

#[rustfmt::skip]
pub use {
    config_ingest::ConfigIngestService,
    consumption_ingest::ConsumptionIngestService,
    document::DocumentRenderer,
    invoice::InvoiceService,
    rating::RatingService,
    report::SalesReportService,
};
