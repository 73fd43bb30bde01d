pub mod ingest;
pub mod report;
pub mod snapshot;
pub mod validate;
