use serde::Deserialize;

/// Marker character flagging a cancelled invoice.
///
/// The upstream retail export prefixes cancellation invoices with a `C`, but
/// the filter contract is a case-insensitive substring match anywhere in the
/// identifier, so `c12345` is excluded just like `C12345`.
pub const CANCELLATION_MARKER: char = 'C';

/// One row of the raw transaction log.
///
/// Serde field names match the retail export headers; columns the pipeline
/// does not use (invoice date, unit price, country) are ignored by the
/// reader. `customer_id` is absent for guest checkouts.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "InvoiceNo")]
    pub invoice_no: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "CustomerID", default)]
    pub customer_id: Option<u32>,
}

impl Transaction {
    /// Creates a transaction record without a customer identifier.
    pub fn new(invoice_no: String, description: String, quantity: i64) -> Self {
        Self {
            invoice_no,
            description,
            quantity,
            customer_id: None,
        }
    }

    /// Whether this record belongs to a cancelled invoice.
    pub fn is_cancellation(&self) -> bool {
        self.invoice_no
            .chars()
            .any(|c| c.eq_ignore_ascii_case(&CANCELLATION_MARKER))
    }
}
