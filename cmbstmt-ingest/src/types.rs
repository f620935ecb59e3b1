use serde::{Deserialize, Serialize};

use crate::headers::{HEADER_COUNT, default_headers};

/// One row of the statement's transaction listing.
///
/// Field names on the wire follow the export/table consumers (`amountRMB`,
/// `cardLastFour`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 1-based position in emission order
    pub original_index: usize,
    /// `YYYY-MM-DD` or empty
    pub trans_date: String,
    /// `YYYY-MM-DD` or empty
    pub post_date: String,
    pub description: String,
    /// Settlement amount in RMB. Negative means credit/refund.
    #[serde(rename = "amountRMB")]
    pub amount_rmb: f64,
    pub card_last_four: String,
    /// Amount in the transaction currency, when printed
    pub original_amount: Option<f64>,
}

/// Result of one parse: resolved column headers plus the transactions in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub headers: [String; HEADER_COUNT],
    pub transactions: Vec<Transaction>,
}

impl ParsedStatement {
    /// Default headers and no transactions.
    pub fn empty() -> Self {
        Self {
            headers: default_headers(),
            transactions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
