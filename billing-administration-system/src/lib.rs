pub mod api;
pub mod infrastructure;

pub use api::BillingAdmin;
