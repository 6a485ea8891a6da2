//! Config path codec.
//!
//! A config path is the positional form of a [`Config`]: parameter values in
//! declaration order joined by `/`, e.g. `M/white/25`.

use prodcfg_core::{Config, ParamValue, ParameterDefinition, ParameterKind, ProductDefinition};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Pair path segments with parameter names.
///
/// One leading and one trailing separator are ignored. Parameters past the
/// last segment get no entry; segments past the last parameter are dropped.
pub fn parse(path: &str, names: &[&str]) -> Config {
    let path = path.strip_prefix(SEPARATOR).unwrap_or(path);
    let path = path.strip_suffix(SEPARATOR).unwrap_or(path);

    names
        .iter()
        .zip(path.split(SEPARATOR))
        .map(|(name, segment)| (*name, ParamValue::text(segment)))
        .collect()
}

/// Join the values of `order` into a path. Missing values render empty.
pub fn serialize(config: &Config, order: &[&str]) -> String {
    order
        .iter()
        .map(|name| config.get(name).map(ToString::to_string).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Default value of a parameter: the first option, or the static value as text.
pub fn default_value(param: &ParameterDefinition) -> ParamValue {
    match &param.kind {
        ParameterKind::Select { options } => options
            .first()
            .map(|o| ParamValue::text(&o.value))
            .unwrap_or_else(|| ParamValue::text("")),
        ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => {
            ParamValue::text(spec.value.normalize().to_string())
        }
    }
}

/// The all-defaults configuration of a product.
pub fn defaults(product: &ProductDefinition) -> Config {
    product
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), default_value(p)))
        .collect()
}

/// Decode a requested path. No path, or an empty one, means all defaults.
pub fn decode(product: &ProductDefinition, path: Option<&str>) -> Config {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => parse(path, &product.parameter_names()),
        None => defaults(product),
    }
}
