//! Named formulas for JSON workbook documents.
//!
//! A JSON workbook cannot carry closures, so formula cells name a function
//! registered here and pass it cell references or literal arguments:
//!
//! ```json
//! { "C3": { "formula": "equals", "args": ["B2", "L"] } }
//! ```
//!
//! String arguments that parse as a cell reference are read from the sheet;
//! everything else is a literal.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prodcfg_core::{CellRef, CellValue};

use crate::workbook::FormulaContext;

/// One argument of a named formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormulaArg {
    /// Read this cell on the formula's sheet.
    Cell(CellRef),
    /// Use this value.
    Value(CellValue),
}

impl FormulaArg {
    /// Current value of the argument.
    pub fn resolve(&self, ctx: &FormulaContext<'_>) -> CellValue {
        match self {
            Self::Cell(cell) => ctx.value_at(cell),
            Self::Value(value) => value.clone(),
        }
    }

    fn number(&self, ctx: &FormulaContext<'_>) -> Result<Decimal, String> {
        let value = self.resolve(ctx);
        value
            .as_decimal()
            .ok_or_else(|| format!("#VALUE! expected a number, got '{value}'"))
    }
}

/// A named formula implementation.
pub type NamedFormula =
    Arc<dyn Fn(&FormulaContext<'_>, &[FormulaArg]) -> Result<CellValue, String> + Send + Sync>;

/// Registry of named formulas.
#[derive(Clone, Default)]
pub struct FormulaRegistry {
    formulas: HashMap<String, NamedFormula>,
}

impl FormulaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in functions.
    ///
    /// `equals`, `not`, `and`, `or`, `if`, `sum`, `product`, `min`, `max`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("equals", |ctx, args| {
            let [a, b] = args else {
                return Err(arity("equals", 2, args.len()));
            };
            Ok(CellValue::Bool(values_equal(&a.resolve(ctx), &b.resolve(ctx))))
        });
        registry.register("not", |ctx, args| {
            let [a] = args else {
                return Err(arity("not", 1, args.len()));
            };
            Ok(CellValue::Bool(!a.resolve(ctx).is_enabled_flag()))
        });
        registry.register("and", |ctx, args| {
            Ok(CellValue::Bool(args.iter().all(|a| a.resolve(ctx).is_enabled_flag())))
        });
        registry.register("or", |ctx, args| {
            Ok(CellValue::Bool(args.iter().any(|a| a.resolve(ctx).is_enabled_flag())))
        });
        registry.register("if", |ctx, args| {
            let [condition, then, otherwise] = args else {
                return Err(arity("if", 3, args.len()));
            };
            Ok(if condition.resolve(ctx).is_enabled_flag() {
                then.resolve(ctx)
            } else {
                otherwise.resolve(ctx)
            })
        });
        registry.register("sum", |ctx, args| {
            let mut total = Decimal::ZERO;
            for arg in args {
                total = total
                    .checked_add(arg.number(ctx)?)
                    .ok_or_else(|| "#NUM! overflow".to_string())?;
            }
            Ok(CellValue::Number(total))
        });
        registry.register("product", |ctx, args| {
            let mut total = Decimal::ONE;
            for arg in args {
                total = total
                    .checked_mul(arg.number(ctx)?)
                    .ok_or_else(|| "#NUM! overflow".to_string())?;
            }
            Ok(CellValue::Number(total))
        });
        registry.register("min", |ctx, args| fold_numbers(ctx, args, "min", Decimal::min));
        registry.register("max", |ctx, args| fold_numbers(ctx, args, "max", Decimal::max));
        registry
    }

    /// Register a formula under a name, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, formula: F) -> &mut Self
    where
        F: Fn(&FormulaContext<'_>, &[FormulaArg]) -> Result<CellValue, String>
            + Send
            + Sync
            + 'static,
    {
        self.formulas.insert(name.to_string(), Arc::new(formula));
        self
    }

    /// Look a formula up.
    pub fn get(&self, name: &str) -> Option<NamedFormula> {
        self.formulas.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for FormulaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn arity(name: &str, expected: usize, got: usize) -> String {
    format!("#N/A {name} takes {expected} argument(s), got {got}")
}

fn values_equal(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x == y,
        (CellValue::Text(x), CellValue::Text(y)) => x.eq_ignore_ascii_case(y),
        _ => a == b,
    }
}

fn fold_numbers(
    ctx: &FormulaContext<'_>,
    args: &[FormulaArg],
    name: &str,
    pick: fn(Decimal, Decimal) -> Decimal,
) -> Result<CellValue, String> {
    let mut numbers = args.iter().map(|a| a.number(ctx));
    let first = numbers
        .next()
        .ok_or_else(|| format!("#N/A {name} needs at least one argument"))??;
    let mut acc = first;
    for n in numbers {
        acc = pick(acc, n?);
    }
    Ok(CellValue::Number(acc))
}
