//! Product templates and configured products.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::cell::{CellValue, Source};
use super::parameter::{ParameterDefinition, ParameterKind, SelectOption};
use crate::error::{ProdcfgError, ProdcfgResult};

/// The workbook a product is computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookRef {
    /// Document name, resolved by the spreadsheet engine.
    pub document: String,
    /// Sheet to use; the first sheet when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl WorkbookRef {
    /// Refers to the first sheet of `document`.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            sheet: None,
        }
    }
}

/// A price tier of a product template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Tier identifier.
    pub id: Source<Decimal>,
    /// Tier quantity. Literals scale with the quantity parameter.
    pub qty: Source<Decimal>,
}

/// A price tier with every cell reference resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Tier identifier.
    pub id: CellValue,
    /// Tier quantity.
    pub qty: CellValue,
}

/// Immutable product template.
///
/// Templates are loaded once and shared; each configuration run works on its
/// own clone, the only place derived flags are ever written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDefinition {
    /// Product name, the registry key.
    pub name: String,

    /// Parameters in declaration order. The order defines the config path.
    pub parameters: Vec<ParameterDefinition>,

    /// Unit weight literal, or the cell holding the total weight.
    pub weight: Source<Decimal>,

    /// Price tiers.
    #[serde(default)]
    pub prices: Vec<PriceTier>,

    /// Workbook used for resolution.
    #[serde(rename = "xcalc", alias = "workbook")]
    pub workbook: WorkbookRef,

    /// Presentation attributes passed through untouched (title, images, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ProductDefinition {
    /// Parameter names in declaration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Looks a parameter up by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The quantity parameter, if the product has one.
    pub fn quantity_parameter(&self) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.is_quantity())
    }

    /// Checks the template for structural problems.
    ///
    /// Inverted bounds can only be caught here when both are literals; bounds
    /// read from cells are checked again once resolved.
    pub fn validate(&self) -> ProdcfgResult<()> {
        let invalid = |reason: String| Err(ProdcfgError::invalid_definition(&self.name, reason));

        if self.name.trim().is_empty() {
            return invalid("product name is empty".into());
        }

        let mut names = HashSet::new();
        let mut quantities = 0;

        for param in &self.parameters {
            if param.name.is_empty() {
                return invalid("parameter with empty name".into());
            }
            if !names.insert(param.name.as_str()) {
                return invalid(format!("duplicate parameter '{}'", param.name));
            }

            match &param.kind {
                ParameterKind::Select { options } => {
                    validate_options(&param.name, options).or_else(invalid)?;
                }
                ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => {
                    if param.is_quantity() {
                        quantities += 1;
                    }
                    if let (Some(Source::Literal(min)), Some(Source::Literal(max))) =
                        (&spec.min, &spec.max)
                    {
                        if min > max {
                            return invalid(format!(
                                "parameter '{}' has min {} above max {}",
                                param.name, min, max
                            ));
                        }
                    }
                }
            }
        }

        if quantities > 1 {
            return invalid("more than one quantity parameter".into());
        }

        Ok(())
    }
}

fn validate_options(param: &str, options: &[SelectOption]) -> Result<(), String> {
    if options.is_empty() {
        return Err(format!("select parameter '{param}' has no options"));
    }

    let fallbacks = options.iter().filter(|o| o.is_fallback).count();
    if fallbacks > 1 {
        return Err(format!(
            "select parameter '{param}' has {fallbacks} fallback options"
        ));
    }

    let mut seen = HashSet::new();
    for option in options {
        if option.value.contains('/') {
            return Err(format!(
                "option '{}' of '{param}' contains the path separator",
                option.value
            ));
        }
        if !seen.insert(option.value.as_str()) {
            return Err(format!("duplicate option '{}' in '{param}'", option.value));
        }
    }

    Ok(())
}

/// A fully resolved, render-ready product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredProduct {
    /// Product name.
    pub name: String,

    /// Parameters with selected options, resolved numeric values, resolved
    /// bounds and derived enabled flags.
    pub parameters: Vec<ParameterDefinition>,

    /// Canonical config path of the resolved configuration.
    pub config_path: String,

    /// Value of the quantity parameter, when it has a non-zero one.
    pub quantity: Option<Decimal>,

    /// Resolved weight.
    pub weight: CellValue,

    /// Resolved price tiers.
    pub prices: Vec<ResolvedPrice>,

    /// Workbook the product was computed with.
    #[serde(rename = "xcalc")]
    pub workbook: WorkbookRef,

    /// Presentation attributes from the template.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ConfiguredProduct {
    /// The selected option value of a select parameter.
    pub fn selected(&self, param: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == param)
            .and_then(ParameterDefinition::selected_option)
            .map(|o| o.value.as_str())
    }

    /// The resolved value of a numeric parameter.
    pub fn numeric_value(&self, param: &str) -> Option<Decimal> {
        self.parameters
            .iter()
            .find(|p| p.name == param)
            .and_then(ParameterDefinition::numeric)
            .map(|spec| spec.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parameter::NumericParameter;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn tshirt() -> ProductDefinition {
        serde_json::from_value(json!({
            "name": "tshirt",
            "title": "Classic T-Shirt",
            "parameters": [
                { "name": "size", "type": "select", "options": [
                    { "value": "S" }, { "value": "M" }, { "value": "L" }
                ]},
                { "name": "qty", "type": "quantity", "min": 1, "max": 500, "value": 1 }
            ],
            "weight": 0.2,
            "prices": [{ "id": 101, "qty": "F2" }],
            "xcalc": { "document": "tshirt.json" }
        }))
        .unwrap()
    }

    #[test]
    fn test_template_json_shape() {
        let product = tshirt();
        assert_eq!(product.parameter_names(), vec!["size", "qty"]);
        assert_eq!(product.weight, Source::Literal(dec!(0.2)));
        assert_eq!(product.workbook.document, "tshirt.json");
        assert_eq!(product.attributes["title"], "Classic T-Shirt");
        assert_eq!(product.quantity_parameter().map(|p| p.name.as_str()), Some("qty"));
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_fallbacks() {
        let mut product = tshirt();
        product.parameters[0] = ParameterDefinition::select(
            "size",
            vec![SelectOption::new("S").fallback(), SelectOption::new("M").fallback()],
        );
        let err = product.validate().unwrap_err();
        assert!(err.to_string().contains("fallback"));
    }

    #[test]
    fn test_validate_rejects_inverted_literal_bounds() {
        let mut product = tshirt();
        product.parameters[1] = ParameterDefinition::quantity(
            "qty",
            NumericParameter::new(dec!(1))
                .with_bounds(Source::Literal(dec!(10)), Source::Literal(dec!(5))),
        );
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_separator_in_option() {
        let mut product = tshirt();
        product.parameters[0] =
            ParameterDefinition::select("size", vec![SelectOption::new("S/M")]);
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_two_quantities() {
        let mut product = tshirt();
        product.parameters.push(ParameterDefinition::quantity(
            "boxes",
            NumericParameter::new(dec!(1)),
        ));
        assert!(product.validate().is_err());
    }
}
