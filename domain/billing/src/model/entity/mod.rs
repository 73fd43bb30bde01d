mod category;
mod client;
mod consumption;
mod invoice;
mod resource;

#[rustfmt::skip]
pub use {
    category::{Category, Configuration},
    client::{Client, Instance},
    consumption::Consumption,
    invoice::{Invoice, InvoiceDetail},
    resource::Resource,
};
