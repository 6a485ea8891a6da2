//! Parameter definitions.
//!
//! A parameter is one configurable dimension of a product. The set of kinds is
//! closed: [`ParameterKind`] is matched exhaustively wherever a parameter is
//! validated, repaired, resolved or materialized.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cell::{CellRef, Source};

/// One choice of a select parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    /// Value written to the config path when this option is chosen.
    pub value: String,

    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Cell deciding whether this option is currently available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_cell: Option<CellRef>,

    /// Chosen when the owning parameter is disabled.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_fallback: bool,

    /// Derived availability. `None` until an enabled cell has been read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Set on the chosen option of a configured product.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl SelectOption {
    /// Creates a plain, always-available option.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            enabled_cell: None,
            is_fallback: false,
            enabled: None,
            selected: false,
        }
    }

    /// Makes availability depend on `cell`.
    #[must_use]
    pub fn with_enabled_cell(mut self, cell: CellRef) -> Self {
        self.enabled_cell = Some(cell);
        self
    }

    /// Marks this option as the fallback.
    #[must_use]
    pub fn fallback(mut self) -> Self {
        self.is_fallback = true;
        self
    }

    /// Available unless explicitly disabled.
    pub fn is_available(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Shape of a `number` or `quantity` parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericParameter {
    /// Lower bound, literal or cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Source<Decimal>>,

    /// Upper bound, literal or cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Source<Decimal>>,

    /// Static default; replaced by the resolved value on configured products.
    pub value: Decimal,
}

impl NumericParameter {
    /// Creates an unbounded numeric parameter.
    pub fn new(value: Decimal) -> Self {
        Self {
            min: None,
            max: None,
            value,
        }
    }

    /// Sets both bounds.
    #[must_use]
    pub fn with_bounds(
        mut self,
        min: impl Into<Option<Source<Decimal>>>,
        max: impl Into<Option<Source<Decimal>>>,
    ) -> Self {
        self.min = min.into();
        self.max = max.into();
        self
    }
}

/// The closed set of parameter kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    /// Pick one of a fixed list of options.
    Select {
        /// Options in declaration order.
        options: Vec<SelectOption>,
    },
    /// Free numeric value.
    Number(NumericParameter),
    /// Numeric value that also scales literal weight and price quantities.
    Quantity(NumericParameter),
}

impl ParameterKind {
    /// Kind name as used in template JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Number(_) => "number",
            Self::Quantity(_) => "quantity",
        }
    }
}

/// One parameter of a product template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    /// Parameter name, the config key.
    pub name: String,

    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Cell the candidate value is written to before recalculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellRef>,

    /// Cell deciding whether the parameter is currently enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_cell: Option<CellRef>,

    /// Derived flag. `None` until an enabled cell has been read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Kind-specific shape.
    #[serde(flatten)]
    pub kind: ParameterKind,
}

impl ParameterDefinition {
    /// Creates a parameter with no cells attached.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            cell: None,
            enabled_cell: None,
            enabled: None,
            kind,
        }
    }

    /// Creates a select parameter.
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, ParameterKind::Select { options })
    }

    /// Creates a number parameter.
    pub fn number(name: impl Into<String>, spec: NumericParameter) -> Self {
        Self::new(name, ParameterKind::Number(spec))
    }

    /// Creates a quantity parameter.
    pub fn quantity(name: impl Into<String>, spec: NumericParameter) -> Self {
        Self::new(name, ParameterKind::Quantity(spec))
    }

    /// Attaches the write-target cell.
    #[must_use]
    pub fn with_cell(mut self, cell: CellRef) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Attaches the enabled-flag cell.
    #[must_use]
    pub fn with_enabled_cell(mut self, cell: CellRef) -> Self {
        self.enabled_cell = Some(cell);
        self
    }

    /// Options of a select parameter, empty for numeric ones.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            ParameterKind::Select { options } => options,
            ParameterKind::Number(_) | ParameterKind::Quantity(_) => &[],
        }
    }

    /// Numeric shape of a number or quantity parameter.
    pub fn numeric(&self) -> Option<&NumericParameter> {
        match &self.kind {
            ParameterKind::Select { .. } => None,
            ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => Some(spec),
        }
    }

    /// Whether this is the quantity parameter.
    pub fn is_quantity(&self) -> bool {
        matches!(self.kind, ParameterKind::Quantity(_))
    }

    /// Enabled unless an enabled cell said otherwise.
    pub fn is_available(&self) -> bool {
        self.enabled != Some(false)
    }

    /// The option currently marked selected.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options().iter().find(|o| o.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_select_json_shape() {
        let param: ParameterDefinition = serde_json::from_value(json!({
            "name": "color",
            "type": "select",
            "cell": "B3",
            "enabledCell": "C3",
            "options": [
                { "value": "white", "isFallback": true },
                { "value": "gold", "enabledCell": "D3" }
            ]
        }))
        .unwrap();

        assert_eq!(param.name, "color");
        assert_eq!(param.cell.as_ref().map(CellRef::as_str), Some("B3"));
        assert_eq!(param.kind.type_name(), "select");
        assert_eq!(param.options().len(), 2);
        assert!(param.options()[0].is_fallback);
        assert_eq!(
            param.options()[1].enabled_cell.as_ref().map(CellRef::as_str),
            Some("D3")
        );
    }

    #[test]
    fn test_numeric_json_shape() {
        let param: ParameterDefinition = serde_json::from_value(json!({
            "name": "qty",
            "type": "quantity",
            "min": 1,
            "max": "E4",
            "value": 10
        }))
        .unwrap();

        assert!(param.is_quantity());
        let spec = param.numeric().unwrap();
        assert_eq!(spec.min, Some(Source::Literal(dec!(1))));
        assert_eq!(spec.max, Some(Source::Cell(CellRef::parse("E4").unwrap())));
        assert_eq!(spec.value, dec!(10));
    }

    #[test]
    fn test_derived_flags_are_omitted_until_set() {
        let param = ParameterDefinition::select("size", vec![SelectOption::new("S")]);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "select");
        assert!(json.get("enabled").is_none());
        assert!(json["options"][0].get("selected").is_none());
    }
}
