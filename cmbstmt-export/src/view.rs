//! Table view model: filter and sort over parsed transactions.

use cmbstmt_ingest::Transaction;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    OriginalIndex,
    TransDate,
    PostDate,
    AmountRmb,
    Description,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::OriginalIndex => "index",
            SortField::TransDate => "trans-date",
            SortField::PostDate => "post-date",
            SortField::AmountRmb => "amount",
            SortField::Description => "description",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::OriginalIndex => a.original_index.cmp(&b.original_index),
            SortField::TransDate => a.trans_date.cmp(&b.trans_date),
            SortField::PostDate => a.post_date.cmp(&b.post_date),
            SortField::AmountRmb => a.amount_rmb.total_cmp(&b.amount_rmb),
            SortField::Description => a.description.cmp(&b.description),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" | "#" => Ok(SortField::OriginalIndex),
            "trans-date" | "trans" | "date" => Ok(SortField::TransDate),
            "post-date" | "post" => Ok(SortField::PostDate),
            "amount" | "amount-rmb" => Ok(SortField::AmountRmb),
            "description" | "desc" => Ok(SortField::Description),
            other => Err(format!(
                "unknown sort field '{other}' (expected index, trans-date, post-date, amount, description)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub filter: Option<String>,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl TableView {
    /// Same field flips direction; a new field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.sort_field == field {
            self.direction = self.direction.flip();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Filtered and sorted rows. Ties keep statement order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let needle = self
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| needle.as_deref().is_none_or(|n| matches_filter(t, n)))
            .collect();

        rows.sort_by(|a, b| {
            let ord = self.sort_field.compare(a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        rows
    }
}

fn matches_filter(txn: &Transaction, needle: &str) -> bool {
    txn.description.to_lowercase().contains(needle)
        || txn.amount_rmb.to_string().contains(needle)
        || txn.card_last_four.contains(needle)
}
