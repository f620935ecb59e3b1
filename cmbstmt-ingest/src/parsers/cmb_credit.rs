//! China Merchants Bank (招商银行) credit card statement parser.
//!
//! PDF text extraction flattens the transaction table into one fragment per
//! cell, in reading order:
//!   11/02                              transaction date (optional)
//!   11/03                              post date (optional)
//!   支付宝-特约商户                      description
//!   38.20                              RMB amount
//!   5445                               card last four  <- anchor
//!   38.20                              original-currency amount (optional)
//!
//! Rows are recovered by scanning for the card suffix and looking around it.

use tracing::{debug, error, info};

use crate::amount::parse_amount;
use crate::error::Result;
use crate::headers::detect_headers;
use crate::patterns::{is_amount, is_card_suffix, is_date};
use crate::period::{ReferencePeriod, detect_reference_period};
use crate::types::{ParsedStatement, Transaction};

/// Descriptions of scheduled repayments. These rows print only a post date.
pub const REPAYMENT_MARKERS: [&str; 2] = ["自动还款", "Automatic Repayment"];

/// Why an anchor candidate did not produce a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NoAmount,
    NoDescription,
    DateAsDescription,
}

impl Skip {
    fn as_str(self) -> &'static str {
        match self {
            Skip::NoAmount => "no amount before card suffix",
            Skip::NoDescription => "no description before amount",
            Skip::DateAsDescription => "description slot holds a date",
        }
    }
}

/// The fragments around one anchor at index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window<'a> {
    /// `i`
    card: &'a str,
    /// `i-1`
    amount: &'a str,
    /// `i-2`
    description: &'a str,
    /// `i-3`
    near: Option<&'a str>,
    /// `i-4`
    far: Option<&'a str>,
    /// `i+1`
    trailing: Option<&'a str>,
}

impl<'a> Window<'a> {
    /// Look around the card suffix `card` found at `idx`.
    fn around<S: AsRef<str>>(
        fragments: &'a [S],
        idx: usize,
        card: &'a str,
    ) -> std::result::Result<Self, Skip> {
        let at = |offset_back: usize| -> Option<&'a str> {
            idx.checked_sub(offset_back)
                .and_then(|i| fragments.get(i))
                .map(AsRef::as_ref)
        };

        let amount = at(1).filter(|s| is_amount(s)).ok_or(Skip::NoAmount)?;
        let description = at(2).ok_or(Skip::NoDescription)?;
        if is_date(description) {
            return Err(Skip::DateAsDescription);
        }

        Ok(Self {
            card,
            amount,
            description,
            near: at(3),
            far: at(4),
            trailing: fragments.get(idx + 1).map(AsRef::as_ref),
        })
    }

    fn date_layout(&self) -> DateLayout<'a> {
        DateLayout::classify(self.near, self.far)
    }

    /// The fragment after the anchor, when it is an amount rather than the next
    /// row's date.
    fn original_amount(&self) -> Option<&'a str> {
        let next = self.trailing.filter(|s| is_amount(s) && !is_date(s))?;
        // Never marked consumed: the scan can only skip it because an amount is
        // never a card suffix.
        debug_assert!(!is_card_suffix(next));
        Some(next)
    }
}

/// Which date fragments precede the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateLayout<'a> {
    /// `i-4` and `i-3` are both dates
    TransAndPost { trans: &'a str, post: &'a str },
    /// only `i-3` is a date
    Single(&'a str),
    /// `i-3` is not a date
    Undated,
}

impl<'a> DateLayout<'a> {
    fn classify(near: Option<&'a str>, far: Option<&'a str>) -> Self {
        let near = near.filter(|s| is_date(s));
        let far = far.filter(|s| is_date(s));
        match (near, far) {
            (Some(post), Some(trans)) => DateLayout::TransAndPost { trans, post },
            (Some(date), None) => DateLayout::Single(date),
            (None, _) => DateLayout::Undated,
        }
    }

    /// `(trans_date, post_date)` as printed, empty where missing.
    fn assign(self, description: &str) -> (&'a str, &'a str) {
        match self {
            DateLayout::TransAndPost { trans, post } => (trans, post),
            DateLayout::Single(date) if is_repayment(description) => ("", date),
            DateLayout::Single(date) => (date, ""),
            DateLayout::Undated => ("", ""),
        }
    }
}

fn is_repayment(description: &str) -> bool {
    REPAYMENT_MARKERS.iter().any(|m| description.contains(m))
}

fn build_transaction(
    window: &Window<'_>,
    period: &ReferencePeriod,
    original_index: usize,
) -> Result<Transaction> {
    let (trans, post) = window.date_layout().assign(window.description);
    let original_amount = window.original_amount().map(parse_amount).transpose()?;

    Ok(Transaction {
        original_index,
        trans_date: period.format_date(trans),
        post_date: period.format_date(post),
        description: window.description.to_string(),
        amount_rmb: parse_amount(window.amount)?,
        card_last_four: window.card.to_string(),
        original_amount,
    })
}

/// Parse a CMB credit card statement, falling back to the current month when
/// the statement does not print its period.
pub fn parse_cmb_credit<S: AsRef<str>>(fragments: &[S]) -> ParsedStatement {
    parse_cmb_credit_with_fallback(fragments, ReferencePeriod::current())
}

/// Parse a CMB credit card statement.
///
/// The reference period is the first one found in the leading fragments, else
/// `fallback`. Never fails: anchors whose surroundings do not fit a row are
/// skipped, so the worst case is an empty transaction list.
pub fn parse_cmb_credit_with_fallback<S: AsRef<str>>(
    fragments: &[S],
    fallback: ReferencePeriod,
) -> ParsedStatement {
    let period = detect_reference_period(fragments).unwrap_or_else(|| {
        debug!(%fallback, "no period printed, using fallback");
        fallback
    });

    let mut transactions: Vec<Transaction> = Vec::new();

    for (idx, fragment) in fragments.iter().enumerate() {
        let card = fragment.as_ref();
        if !is_card_suffix(card) {
            continue;
        }

        let window = match Window::around(fragments, idx, card) {
            Ok(w) => w,
            Err(skip) => {
                debug!(idx, card, reason = skip.as_str(), "anchor skipped");
                continue;
            }
        };

        match build_transaction(&window, &period, transactions.len() + 1) {
            Ok(txn) => {
                debug!(
                    idx,
                    index = txn.original_index,
                    card = %txn.card_last_four,
                    amount = txn.amount_rmb,
                    "row recognized"
                );
                transactions.push(txn);
            }
            Err(e) => {
                // Unreachable for regex-gated input.
                error!(idx, error = %e, "gated amount did not parse, row dropped");
            }
        }
    }

    let headers = detect_headers(fragments);
    info!(
        fragments = fragments.len(),
        transactions = transactions.len(),
        period = %period,
        "parsed CMB credit statement"
    );

    ParsedStatement {
        headers,
        transactions,
    }
}
