use thiserror::Error;

pub type BillingResult<T> = Result<T, BillingException>;

#[derive(Error, Debug)]
pub enum BillingException {
    #[error("Malformed snapshot envelope: {reason}.")]
    MalformedSnapshot { reason: String },

    #[error("Invalid tax id: {tax_id}.")]
    InvalidTaxId { tax_id: String },

    #[error("There is no category with id: {id}.")]
    UnknownCategory { id: i64 },

    #[error("There is no invoice with number: {number}.")]
    UnknownInvoice { number: String },

    #[error("Billing internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for BillingException {
    fn from(e: anyhow::Error) -> Self {
        BillingException::InternalError { source: e }
    }
}
