use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub instance_id: i64,
    pub hours: Decimal,
    pub amount: Decimal,
}

/// A billing document aggregating consumption cost for a client over all
/// its instances. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub client_tax_id: String,
    pub issued_at: String,
    pub total: Decimal,
    pub details: Vec<InvoiceDetail>,
}
