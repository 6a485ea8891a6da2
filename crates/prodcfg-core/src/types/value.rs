//! Candidate parameter values.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// Largest scale a [`Decimal`] carries.
const MAX_SCALE: i64 = 28;

/// Digits of [`Decimal::MAX`].
const MAX_INTEGER_DIGITS: i64 = 29;

/// Exponents are clamped here; anything larger saturates regardless.
const MAX_EXPONENT: i64 = 1_000_000;

/// Parses user-supplied text as a number, with scripting-language rules.
///
/// Accepted forms, after trimming whitespace:
/// - blank text, read as zero so it fails the non-zero check
/// - decimal literals with optional sign, fraction and exponent (`-1.5e3`,
///   `.5`, `5.`)
/// - `Infinity` with optional sign
/// - unsigned `0x`, `0o` and `0b` integers
///
/// Digit separators, repeated signs and trailing junk are rejected.
/// Magnitudes beyond [`Decimal::MAX`] saturate, so they still clamp to a
/// bound. Fractional digits that do not fit are truncated; a non-zero value
/// never truncates to zero.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = if unsigned == "Infinity" {
        Decimal::MAX
    } else {
        parse_decimal_literal(unsigned)?
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// `Some(result)` when the text carries a radix prefix.
fn parse_radix_literal(text: &str) -> Option<Option<Decimal>> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    let value = u128::from_str_radix(digits, radix)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .and_then(|v| Decimal::try_from_i128_with_scale(v, 0).ok())
        .unwrap_or(Decimal::MAX);
    Some(Some(value))
}

/// Unsigned `digits[.digits][e[+-]digits]`.
fn parse_decimal_literal(text: &str) -> Option<Decimal> {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return None;
    }

    let exponent = match exponent {
        None => 0,
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
            let limit = MAX_EXPONENT;
            e.parse::<i64>()
                .unwrap_or(if e.starts_with('-') { -limit } else { limit })
                .clamp(-limit, limit)
        }
    };

    let digits = format!("{int_part}{frac_part}");
    let digits = digits.trim_start_matches('0');
    let significant = digits.trim_end_matches('0');
    if significant.is_empty() {
        return Some(Decimal::ZERO);
    }

    // value = significant * 10^exp10
    let exp10 = exponent - frac_part.len() as i64 + (digits.len() - significant.len()) as i64;

    if exp10 >= 0 {
        if significant.len() as i64 + exp10 > MAX_INTEGER_DIGITS {
            return Some(Decimal::MAX);
        }
        let value = significant
            .parse::<i128>()
            .ok()
            .and_then(|m| m.checked_mul(10i128.checked_pow(exp10 as u32)?))
            .and_then(|m| Decimal::try_from_i128_with_scale(m, 0).ok())
            .unwrap_or(Decimal::MAX);
        return Some(value);
    }

    let mut keep = significant;
    let mut scale = -exp10;
    if scale > MAX_SCALE {
        let excess = (scale - MAX_SCALE) as usize;
        if excess >= keep.len() {
            return Some(Decimal::new(1, MAX_SCALE as u32));
        }
        keep = &keep[..keep.len() - excess];
        scale = MAX_SCALE;
    }

    let surplus = keep
        .len()
        .saturating_sub(MAX_INTEGER_DIGITS as usize)
        .min(scale as usize);
    keep = &keep[..keep.len() - surplus];
    scale -= surplus as i64;

    // Drop fractional digits until the mantissa fits.
    loop {
        let value = keep
            .parse::<i128>()
            .ok()
            .and_then(|m| Decimal::try_from_i128_with_scale(m, scale as u32).ok());
        match value {
            Some(value) => return Some(value),
            None if scale == 0 || keep.len() <= 1 => return Some(Decimal::MAX),
            None => {
                keep = &keep[..keep.len() - 1];
                scale -= 1;
            }
        }
    }
}

/// The candidate value of one parameter.
///
/// Values decoded from a config path are text; repair and clamping produce
/// numbers. Equality is by variant, so `Text("5")` and `Number(5)` differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Raw text, as decoded from a config path.
    Text(String),
    /// A number.
    Number(Decimal),
}

impl ParamValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Numeric reading of the value.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Text(t) => parse_number(t),
            Self::Number(n) => Some(*n),
        }
    }

    /// Numeric reading, treating zero and unparseable text alike as absent.
    pub fn as_nonzero_number(&self) -> Option<Decimal> {
        self.as_number().filter(|n| !n.is_zero())
    }

    /// Whether this is the text `option`.
    pub fn is_text(&self, option: &str) -> bool {
        matches!(self, Self::Text(t) if t == option)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "{t}"),
            Self::Number(n) => write!(f, "{}", n.normalize()),
        }
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&ParamValue> for CellValue {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Text(t) => CellValue::Text(t.clone()),
            ParamValue::Number(n) => CellValue::Number(*n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(dec!(42)));
        assert_eq!(parse_number(" 2.5 "), Some(dec!(2.5)));
        assert_eq!(parse_number("-3"), Some(dec!(-3)));
        assert_eq!(parse_number("1e3"), Some(dec!(1000)));
        assert_eq!(parse_number(""), Some(Decimal::ZERO));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12px"), None);
    }

    #[test]
    fn test_parse_number_literal_forms() {
        assert_eq!(parse_number(".5"), Some(dec!(0.5)));
        assert_eq!(parse_number("5."), Some(dec!(5)));
        assert_eq!(parse_number("+7"), Some(dec!(7)));
        assert_eq!(parse_number("2.5E-1"), Some(dec!(0.25)));
        assert_eq!(parse_number("0x1F"), Some(dec!(31)));
        assert_eq!(parse_number("0b101"), Some(dec!(5)));
        assert_eq!(parse_number("007"), Some(dec!(7)));
        assert_eq!(parse_number("-0"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_number_rejects_malformed_text() {
        for text in ["1_000", "2_00", "1.2.3", "1e", "e3", ".", "+-1", "--1", "-0x10", "0x", "1 2", "infinity", "NaN"] {
            assert_eq!(parse_number(text), None, "{text}");
        }
    }

    #[test]
    fn test_parse_number_saturates_out_of_range() {
        assert_eq!(parse_number("1e30"), Some(Decimal::MAX));
        assert_eq!(parse_number("-1e30"), Some(Decimal::MIN));
        assert_eq!(parse_number("123456789012345678901234567890"), Some(Decimal::MAX));
        assert_eq!(parse_number("Infinity"), Some(Decimal::MAX));
        assert_eq!(parse_number("-Infinity"), Some(Decimal::MIN));
        assert_eq!(parse_number("1e999999999999999999999"), Some(Decimal::MAX));
        assert_eq!(
            parse_number("79228162514264337593543950335"),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_parse_number_keeps_tiny_values_nonzero() {
        assert_eq!(parse_number("1e-40"), Some(Decimal::new(1, 28)));
        assert_eq!(parse_number("1.5e-28"), Some(Decimal::new(1, 28)));
        assert_eq!(parse_number("1e-28"), Some(Decimal::new(1, 28)));
        assert_eq!(parse_number("1e-999999999999999999999"), Some(Decimal::new(1, 28)));
        assert_eq!(parse_number("0e-999"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_display_normalizes_numbers() {
        assert_eq!(ParamValue::Number(dec!(5.00)).to_string(), "5");
        assert_eq!(ParamValue::Number(dec!(2.50)).to_string(), "2.5");
        assert_eq!(ParamValue::text("5.00").to_string(), "5.00");
    }

    #[test]
    fn test_text_and_number_are_distinct() {
        assert_ne!(ParamValue::text("5"), ParamValue::Number(dec!(5)));
        assert_eq!(ParamValue::Number(dec!(5)), ParamValue::Number(dec!(5.0)));
    }

    #[test]
    fn test_nonzero_number() {
        assert_eq!(ParamValue::text("0").as_nonzero_number(), None);
        assert_eq!(ParamValue::text("x").as_nonzero_number(), None);
        assert_eq!(ParamValue::text("3").as_nonzero_number(), Some(dec!(3)));
    }
}
