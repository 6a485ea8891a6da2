//! Static config checks and repair.
//!
//! Both work on the template's static shape only. Whether an option is
//! currently enabled is a workbook question and is left to the resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use prodcfg_core::{Config, ParamValue, ParameterKind, ProductDefinition};

/// One failed static check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Parameter (or unknown key) that failed
    pub parameter: String,
    /// What is wrong with it
    pub reason: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.reason)
    }
}

/// Every static check `config` fails against `product`.
///
/// A select value must be one of the declared options; a numeric value must
/// parse to a non-zero number. Keys naming no parameter are violations too.
pub fn violations(product: &ProductDefinition, config: &Config) -> Vec<Violation> {
    let mut found = Vec::new();

    for param in &product.parameters {
        let Some(value) = config.get(&param.name) else {
            found.push(Violation::new(&param.name, "missing"));
            continue;
        };

        match &param.kind {
            ParameterKind::Select { options } => {
                if !options.iter().any(|o| value.is_text(&o.value)) {
                    found.push(Violation::new(
                        &param.name,
                        format!("'{value}' is not an option"),
                    ));
                }
            }
            ParameterKind::Number(_) | ParameterKind::Quantity(_) => {
                if value.as_nonzero_number().is_none() {
                    found.push(Violation::new(
                        &param.name,
                        format!("'{value}' is not a non-zero number"),
                    ));
                }
            }
        }
    }

    for (key, _) in config.iter() {
        if product.parameter(key).is_none() {
            found.push(Violation::new(key, "unknown parameter"));
        }
    }

    found
}

/// Whether `config` passes every static check.
pub fn is_valid(product: &ProductDefinition, config: &Config) -> bool {
    violations(product, config).is_empty()
}

/// Nearest statically valid config.
///
/// Passing values are kept. A failing select takes its first option and a
/// failing numeric (blank, zero or unparseable) takes its static default.
/// Unknown keys are dropped.
pub fn repair(product: &ProductDefinition, config: &Config) -> Config {
    let mut repaired = Config::new();

    for param in &product.parameters {
        let value = config.get(&param.name);

        let fixed = match &param.kind {
            ParameterKind::Select { options } => match value {
                Some(v) if options.iter().any(|o| v.is_text(&o.value)) => v.clone(),
                _ => options
                    .first()
                    .map(|o| ParamValue::text(&o.value))
                    .unwrap_or_else(|| ParamValue::text("")),
            },
            ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => match value {
                Some(v) if v.as_nonzero_number().is_some() => v.clone(),
                _ => ParamValue::Number(spec.value),
            },
        };

        repaired.insert(param.name.as_str(), fixed);
    }

    repaired
}
