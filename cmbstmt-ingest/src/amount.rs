//! Amount parsing for gated amount fragments.

use crate::error::{IngestError, Result};

/// Parse a statement amount like `-1,234.50`.
///
/// Thousands separators are stripped before parsing. Callers gate input with
/// [`crate::patterns::is_amount`]; anything else is reported as
/// [`IngestError::InvalidAmount`].
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned = raw.replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IngestError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_basic() {
        assert_eq!(parse_amount("38.20").unwrap(), 38.2);
        assert_eq!(parse_amount("-68.00").unwrap(), -68.0);
        assert_eq!(parse_amount("1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("-12,000.00").unwrap(), -12000.0);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        let err = parse_amount("abc").unwrap_err();
        assert!(matches!(err, IngestError::InvalidAmount(ref s) if s == "abc"));
        assert!(parse_amount("").is_err());
        assert!(parse_amount(",").is_err());
        assert!(parse_amount("inf").is_err());
    }
}
