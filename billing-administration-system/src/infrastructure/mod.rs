pub mod config;
pub mod render;
pub mod repository;
pub mod service_provider;
pub mod telemetry;

pub use service_provider::ServiceProvider;
