//! Regex gates used to identify fragment roles.
//!
//! Digit classes are ASCII-only. Fullwidth digits never form an anchor.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn card_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("card suffix regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9,]+\.[0-9]{2}$").expect("amount regex"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("date regex"))
}

fn period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "2025/11/05", "2025年11月"
    RE.get_or_init(|| {
        Regex::new(r"(20[0-9]{2})[/\x{4e00}-\x{9fa5}]([0-9]{1,2})").expect("period regex")
    })
}

/// Exactly four digits: the last four of a card number.
pub fn is_card_suffix(s: &str) -> bool {
    card_suffix_re().is_match(s)
}

/// Signed decimal with two fraction digits, thousands separators allowed.
pub fn is_amount(s: &str) -> bool {
    amount_re().is_match(s)
}

/// Strict `MM/DD`.
pub fn is_date(s: &str) -> bool {
    date_re().is_match(s)
}

/// First `(year, month)` capture in `s`, unanchored.
pub fn reference_period_captures(s: &str) -> Option<Captures<'_>> {
    period_re().captures(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_suffix() {
        assert!(is_card_suffix("5445"));
        assert!(!is_card_suffix("544"));
        assert!(!is_card_suffix("54455"));
        assert!(!is_card_suffix(" 5445"));
        // fullwidth digits
        assert!(!is_card_suffix("５４４５"));
    }

    #[test]
    fn test_amount() {
        assert!(is_amount("38.20"));
        assert!(is_amount("-68.00"));
        assert!(is_amount("1,234,567.89"));
        assert!(!is_amount("38.2"));
        assert!(!is_amount("38"));
        assert!(!is_amount("+38.20"));
        assert!(!is_amount("11/02"));
    }

    #[test]
    fn test_date() {
        assert!(is_date("11/02"));
        assert!(!is_date("1/02"));
        assert!(!is_date("11/2"));
        assert!(!is_date("2025/11/02"));
        assert!(!is_date(""));
    }

    #[test]
    fn test_amounts_never_look_like_anchors() {
        // The scanner never marks the look-ahead fragment as consumed; this only
        // holds because an amount can never also be a card suffix.
        let samples = [
            "0.00", "1.00", "38.20", "-68.00", "1234.56", "9,999.99", "-1,000.00", ",,.00",
            "1234.00",
        ];
        for s in samples {
            assert!(is_amount(s), "{s} should be an amount");
            assert!(!is_card_suffix(s), "{s} must not be an anchor");
            assert!(!is_date(s), "{s} must not be a date");
        }
        for s in ["5445", "0000", "1234"] {
            assert!(!is_amount(s));
        }
    }

    #[test]
    fn test_reference_period_captures() {
        let caps = reference_period_captures("账单日 2025/11/05").unwrap();
        assert_eq!(&caps[1], "2025");
        assert_eq!(&caps[2], "11");

        let caps = reference_period_captures("2024年1月账单").unwrap();
        assert_eq!(&caps[1], "2024");
        assert_eq!(&caps[2], "1");

        assert!(reference_period_captures("200070").is_none());
        assert!(reference_period_captures("1999/12").is_none());
    }
}
