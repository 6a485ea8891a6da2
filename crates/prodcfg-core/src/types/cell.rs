//! Cell references, cell values and literal-or-cell sources.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value::parse_number;
use crate::error::{ProdcfgError, ProdcfgResult};

/// A cell address in A1 notation (`B2`, `AA17`).
///
/// Stored upper-cased so `b2` and `B2` name the same cell.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef(String);

impl CellRef {
    /// Parses an A1-style reference.
    pub fn parse(reference: &str) -> ProdcfgResult<Self> {
        let normalized = reference.trim().to_ascii_uppercase();

        let letters = normalized
            .chars()
            .take_while(char::is_ascii_uppercase)
            .count();
        let digits = &normalized[letters..];

        let valid = (1..=3).contains(&letters)
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');

        if valid {
            Ok(Self(normalized))
        } else {
            Err(ProdcfgError::invalid_cell_ref(reference))
        }
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CellRef {
    type Err = ProdcfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellRef {
    type Error = ProdcfgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.0
    }
}

/// The value held by a workbook cell.
///
/// Untagged so workbook documents can be written as plain JSON scalars.
/// `Text` is tried before `Number` so that `"1"` stays text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank cell.
    #[default]
    Empty,
    /// Boolean.
    Bool(bool),
    /// Text.
    Text(String),
    /// Number.
    Number(Decimal),
    /// A formula that failed to evaluate.
    Error {
        /// Evaluation error message.
        error: String,
    },
}

impl CellValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates an error value.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Whether the cell reads as an "enabled" flag.
    ///
    /// Only the text `TRUE`, the number `1` and the boolean `true` count.
    pub fn is_enabled_flag(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(t) => t == "TRUE",
            Self::Number(n) => *n == Decimal::ONE,
            Self::Empty | Self::Error { .. } => false,
        }
    }

    /// Numeric reading of the cell, if it has one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => parse_number(t),
            Self::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
            Self::Empty | Self::Error { .. } => None,
        }
    }

    /// Whether this is a formula error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Text(t) => write!(f, "{t}"),
            Self::Number(n) => write!(f, "{}", n.normalize()),
            Self::Error { error } => write!(f, "#ERROR({error})"),
        }
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A value that is either given literally or read from a workbook cell.
///
/// In template JSON a string that parses as a cell reference is a cell,
/// anything else is a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source<T> {
    /// Read from this cell.
    Cell(CellRef),
    /// Use this value as is.
    Literal(T),
}

impl<T> Source<T> {
    /// The cell this source points at, if any.
    pub fn cell(&self) -> Option<&CellRef> {
        match self {
            Self::Cell(cell) => Some(cell),
            Self::Literal(_) => None,
        }
    }

    /// The literal value, if this is not a cell reference.
    pub fn literal(&self) -> Option<&T> {
        match self {
            Self::Cell(_) => None,
            Self::Literal(value) => Some(value),
        }
    }
}

impl<T> From<CellRef> for Source<T> {
    fn from(cell: CellRef) -> Self {
        Self::Cell(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cell_ref_parse() {
        assert_eq!(CellRef::parse("b2").unwrap().as_str(), "B2");
        assert_eq!(CellRef::parse(" AA17 ").unwrap().as_str(), "AA17");
        assert!(CellRef::parse("2B").is_err());
        assert!(CellRef::parse("B").is_err());
        assert!(CellRef::parse("B0").is_err());
        assert!(CellRef::parse("ABCD1").is_err());
        assert!(CellRef::parse("B2:C3").is_err());
    }

    #[test]
    fn test_enabled_flag() {
        assert!(CellValue::text("TRUE").is_enabled_flag());
        assert!(CellValue::Number(dec!(1)).is_enabled_flag());
        assert!(CellValue::Number(dec!(1.0)).is_enabled_flag());
        assert!(CellValue::Bool(true).is_enabled_flag());

        assert!(!CellValue::text("true").is_enabled_flag());
        assert!(!CellValue::text("1").is_enabled_flag());
        assert!(!CellValue::Number(dec!(2)).is_enabled_flag());
        assert!(!CellValue::Bool(false).is_enabled_flag());
        assert!(!CellValue::Empty.is_enabled_flag());
        assert!(!CellValue::error("#DIV/0!").is_enabled_flag());
    }

    #[test]
    fn test_cell_value_json_shape() {
        let values: Vec<CellValue> =
            serde_json::from_str(r##"[null, true, "TRUE", "1", 2.5, {"error": "#REF!"}]"##).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Bool(true),
                CellValue::text("TRUE"),
                CellValue::text("1"),
                CellValue::Number(dec!(2.5)),
                CellValue::error("#REF!"),
            ]
        );
    }

    #[test]
    fn test_source_prefers_cell_references() {
        let sources: Vec<Source<Decimal>> = serde_json::from_str(r#"["E4", 12, "7.5"]"#).unwrap();
        assert_eq!(sources[0], Source::Cell(CellRef::parse("E4").unwrap()));
        assert_eq!(sources[1], Source::Literal(dec!(12)));
        assert_eq!(sources[2], Source::Literal(dec!(7.5)));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_cell_refs_normalize_to_uppercase(
                column in "[a-zA-Z]{1,3}",
                row in 1u32..1_048_576,
            ) {
                let reference = format!("{column}{row}");
                let cell = CellRef::parse(&reference).unwrap();
                prop_assert_eq!(cell.as_str(), reference.to_ascii_uppercase());
                prop_assert_eq!(CellRef::parse(&cell.to_string()).unwrap(), cell);
            }

            #[test]
            fn prop_numbers_are_never_enabled_flags_unless_one(n in -1000i64..1000) {
                let value = CellValue::Number(Decimal::from(n));
                prop_assert_eq!(value.is_enabled_flag(), n == 1);
            }
        }
    }
}
