//! Per-field validation rules
//!
//! Each rule is an independent pure function over one raw cell. The mapper
//! wires them to columns; nothing here knows about rows or error records.

use regex::Regex;
use std::sync::LazyLock;

static CN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6,8}$").expect("hard-coded pattern"));
static ISO2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("hard-coded pattern"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("hard-coded pattern"));

/// Outcome of checking one field value
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome<T> {
    /// Source cell was empty after trimming
    Absent,
    /// Normalized value
    Valid(T),
    /// Present but failed validation
    Invalid,
}

/// Free text: trimmed, empty normalized to absent.
pub fn check_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// CN code: 6-8 decimal digits after trimming and stripping internal
/// whitespace.
pub fn check_cn_code(raw: &str) -> CheckOutcome<String> {
    let compact: String = raw.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        CheckOutcome::Absent
    } else if CN_CODE.is_match(&compact) {
        CheckOutcome::Valid(compact)
    } else {
        CheckOutcome::Invalid
    }
}

/// ISO-3166 alpha-2 country code, upper-cased.
pub fn check_country(raw: &str) -> CheckOutcome<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CheckOutcome::Absent;
    }
    let upper = trimmed.to_uppercase();
    if ISO2.is_match(&upper) {
        CheckOutcome::Valid(upper)
    } else {
        CheckOutcome::Invalid
    }
}

/// Decimal number, with thousands-separator commas stripped before parsing.
/// Non-finite results count as invalid.
pub fn check_decimal(raw: &str) -> CheckOutcome<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CheckOutcome::Absent;
    }
    match trimmed.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() => CheckOutcome::Valid(n),
        _ => CheckOutcome::Invalid,
    }
}

/// Literal `YYYY-MM-DD` shape. Calendar validity is not checked here.
pub fn check_date(raw: &str) -> CheckOutcome<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CheckOutcome::Absent
    } else if DATE.is_match(trimmed) {
        CheckOutcome::Valid(trimmed.to_string())
    } else {
        CheckOutcome::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_text_normalizes_empty_to_absent() {
        assert_eq!(check_text("  hello "), Some("hello".to_string()));
        assert_eq!(check_text(""), None);
        assert_eq!(check_text("   "), None);
    }

    #[test]
    fn test_check_cn_code_accepts_6_to_8_digits() {
        assert_eq!(check_cn_code("850110"), CheckOutcome::Valid("850110".to_string()));
        assert_eq!(
            check_cn_code("72081000"),
            CheckOutcome::Valid("72081000".to_string())
        );
        assert_eq!(check_cn_code("8501100"), CheckOutcome::Valid("8501100".to_string()));
    }

    #[test]
    fn test_check_cn_code_strips_internal_whitespace() {
        assert_eq!(
            check_cn_code(" 7208 1000 "),
            CheckOutcome::Valid("72081000".to_string())
        );
    }

    #[test]
    fn test_check_cn_code_rejects_bad_shapes() {
        assert_eq!(check_cn_code("12AB"), CheckOutcome::Invalid);
        assert_eq!(check_cn_code("12345"), CheckOutcome::Invalid);
        assert_eq!(check_cn_code("123456789"), CheckOutcome::Invalid);
        assert_eq!(check_cn_code("85011.0"), CheckOutcome::Invalid);
    }

    #[test]
    fn test_check_cn_code_empty_is_absent() {
        assert_eq!(check_cn_code(""), CheckOutcome::Absent);
        assert_eq!(check_cn_code("  "), CheckOutcome::Absent);
    }

    #[test]
    fn test_check_country_uppercases() {
        assert_eq!(check_country("de"), CheckOutcome::Valid("DE".to_string()));
        assert_eq!(check_country(" Cn "), CheckOutcome::Valid("CN".to_string()));
    }

    #[test]
    fn test_check_country_rejects_bad_codes() {
        assert_eq!(check_country("DEU"), CheckOutcome::Invalid);
        assert_eq!(check_country("D1"), CheckOutcome::Invalid);
        assert_eq!(check_country("D"), CheckOutcome::Invalid);
    }

    #[test]
    fn test_check_country_empty_is_absent() {
        assert_eq!(check_country(""), CheckOutcome::Absent);
    }

    #[test]
    fn test_check_decimal_plain_and_thousands() {
        assert_eq!(check_decimal("42"), CheckOutcome::Valid(42.0));
        assert_eq!(check_decimal("1,234.5"), CheckOutcome::Valid(1234.5));
        assert_eq!(check_decimal(" 18,500.00 "), CheckOutcome::Valid(18500.0));
        assert_eq!(check_decimal("-3.25"), CheckOutcome::Valid(-3.25));
    }

    #[test]
    fn test_check_decimal_rejects_garbage_and_non_finite() {
        assert_eq!(check_decimal("abc"), CheckOutcome::Invalid);
        assert_eq!(check_decimal("12kg"), CheckOutcome::Invalid);
        assert_eq!(check_decimal("NaN"), CheckOutcome::Invalid);
        assert_eq!(check_decimal("inf"), CheckOutcome::Invalid);
    }

    #[test]
    fn test_check_decimal_empty_is_absent() {
        assert_eq!(check_decimal(""), CheckOutcome::Absent);
    }

    #[test]
    fn test_check_date_shape_only() {
        assert_eq!(
            check_date("2024-01-15"),
            CheckOutcome::Valid("2024-01-15".to_string())
        );
        // Calendar validity is deliberately not this layer's concern
        assert_eq!(
            check_date("2024-13-40"),
            CheckOutcome::Valid("2024-13-40".to_string())
        );
    }

    #[test]
    fn test_check_date_rejects_other_shapes() {
        assert_eq!(check_date("15/01/2024"), CheckOutcome::Invalid);
        assert_eq!(check_date("2024-1-5"), CheckOutcome::Invalid);
        assert_eq!(check_date("20240115"), CheckOutcome::Invalid);
    }

    #[test]
    fn test_check_date_empty_is_absent() {
        assert_eq!(check_date("  "), CheckOutcome::Absent);
    }
}
