//! Column header detection.

/// Number of columns in the transaction listing.
pub const HEADER_COUNT: usize = 6;

/// Column labels as printed on the statement, in column order.
pub const HEADER_KEYWORDS: [&str; HEADER_COUNT] = [
    "交易日",
    "记账日",
    "交易摘要",
    "人民币金额",
    "卡号末四位",
    "交易地金额",
];

/// Labels used when the statement's own labels are not all present.
pub const DEFAULT_HEADERS: [&str; HEADER_COUNT] = [
    "Transaction Date",
    "Post Date",
    "Description",
    "Amount (RMB)",
    "Card #",
    "Original Amount",
];

pub fn default_headers() -> [String; HEADER_COUNT] {
    DEFAULT_HEADERS.map(str::to_string)
}

/// Statement labels if every keyword occurs inside some fragment, else the defaults.
///
/// All-or-nothing: a partial match never mixes keywords with defaults.
pub fn detect_headers<S: AsRef<str>>(fragments: &[S]) -> [String; HEADER_COUNT] {
    let all_present = HEADER_KEYWORDS
        .iter()
        .all(|kw| fragments.iter().any(|f| f.as_ref().contains(kw)));

    if all_present {
        HEADER_KEYWORDS.map(str::to_string)
    } else {
        default_headers()
    }
}
