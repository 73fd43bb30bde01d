mod config_ingest;
mod consumption_ingest;
mod invoice;
mod rating;
mod report;

#[rustfmt::skip]
pub use {
    config_ingest::ConfigIngestServiceImpl,
    consumption_ingest::ConsumptionIngestServiceImpl,
    invoice::InvoiceServiceImpl,
    rating::RatingServiceImpl,
    report::SalesReportServiceImpl,
};
