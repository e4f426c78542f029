//! Lenient amount decoding
//!
//! Amounts arrive as JSON numbers or numeric strings ("10.0", "10.00", " 42 ").
//! Anything that does not parse becomes `None`, which sums treat as zero and
//! exact comparisons treat as "no agreement".

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Parse a textual amount, returning `None` for anything non-numeric
pub fn parse(text: &str) -> Option<BigDecimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}

/// Serde helper for `Option<BigDecimal>` fields fed by loosely typed records
///
/// Signs are kept, so `"-5"` decodes to `-5`; rejecting negatives is left to the
/// validators at the recording boundary.
///
/// A bare JSON number outside the `f64` range (`1e400`) is refused by
/// `serde_json` before this helper sees it, so the whole record fails to
/// decode. The same value as a string (`"1e400"`) decodes exactly.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match raw {
        RawAmount::Integer(value) => Some(BigDecimal::from(value)),
        // Display of a finite f64 is the shortest round-tripping decimal form
        RawAmount::Float(value) if value.is_finite() => parse(&value.to_string()),
        RawAmount::Float(_) => None,
        RawAmount::Text(text) => parse(&text),
        RawAmount::Other(_) => None,
    }))
}

/// The amount, or zero when missing
pub fn or_zero(amount: Option<&BigDecimal>) -> BigDecimal {
    amount.cloned().unwrap_or_else(|| BigDecimal::from(0))
}

/// Two amounts agree only when both are present and numerically equal
pub fn agree(left: Option<&BigDecimal>, right: Option<&BigDecimal>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize")]
        amount: Option<BigDecimal>,
    }

    fn decode(json: &str) -> Option<BigDecimal> {
        serde_json::from_str::<Row>(json).unwrap().amount
    }

    #[test]
    fn test_parse_accepts_decimal_text() {
        assert_eq!(parse("10.0"), parse("10.00"));
        assert_eq!(parse(" 42 "), Some(BigDecimal::from(42)));
        assert_eq!(parse(""), None);
        assert_eq!(parse("abc"), None);
    }

    #[test]
    fn test_deserialize_numbers_strings_and_garbage() {
        assert_eq!(decode(r#"{"amount": 150}"#), Some(BigDecimal::from(150)));
        assert_eq!(decode(r#"{"amount": 12.5}"#), parse("12.5"));
        assert_eq!(decode(r#"{"amount": "2000.00"}"#), Some(BigDecimal::from(2000)));
        assert_eq!(decode(r#"{"amount": "n/a"}"#), None);
        assert_eq!(decode(r#"{"amount": null}"#), None);
        assert_eq!(decode(r#"{"amount": [1, 2]}"#), None);
        assert_eq!(decode(r#"{}"#), None);
    }

    #[test]
    fn test_sign_is_kept() {
        assert_eq!(decode(r#"{"amount": "-5"}"#), Some(BigDecimal::from(-5)));
        assert_eq!(decode(r#"{"amount": -5}"#), Some(BigDecimal::from(-5)));
    }

    #[test]
    fn test_huge_amounts() {
        assert!(serde_json::from_str::<Row>(r#"{"amount": 1e400}"#).is_err());
        assert_eq!(decode(r#"{"amount": "1e400"}"#), parse("1e400"));
        assert!(decode(r#"{"amount": "1e400"}"#).is_some());
    }

    #[test]
    fn test_agree_requires_both_amounts() {
        let ten = parse("10.0");
        let ten_again = parse("10.00");
        assert!(agree(ten.as_ref(), ten_again.as_ref()));
        assert!(!agree(ten.as_ref(), None));
        assert!(!agree(None, None));
    }
}
