//! Fixed-point config resolver.
//!
//! One pass writes every candidate value into its cell, recalculates, reads
//! enabled flags back, resolves cell bounds, clamps numeric values and
//! re-selects select options. Passes repeat until a pass leaves the config
//! unchanged or the pass cap is hit.
//!
//! ```text
//!   Config ──> write cells ──> recalculate ──> read flags/bounds ──> Config'
//!     ^                                                                │
//!     └──────────────────────── Config' != Config ─────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use prodcfg_core::types::{NumericParameter, SelectOption};
use prodcfg_core::{CellValue, Config, ParamValue, ParameterKind, ProductDefinition, Source};
use prodcfg_traits::config::DEFAULT_MAX_PASSES;
use prodcfg_traits::spreadsheet::{FormulaError, RecalcOptions, Workbook};

use crate::error::EngineError;

/// A converged configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// The fixed point
    pub config: Config,
    /// Passes run, including the final confirming one
    pub passes: usize,
    /// Formula errors of the final recalculation
    pub formula_errors: Vec<FormulaError>,
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A fixed point was reached.
    Resolved(ResolvedConfig),
    /// The pass cap was hit first.
    DidNotConverge {
        /// Passes run
        passes: usize,
        /// Config produced by the last pass
        last: Config,
    },
}

/// Fixed-point resolver.
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    max_passes: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}

impl Resolver {
    /// Create a resolver giving up after `max_passes` passes.
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    /// Pass cap.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Resolve `config` against `workbook`.
    ///
    /// `product` must be a private copy: enabled flags are written onto its
    /// parameters and options, and its cell bounds are replaced by the
    /// literals read on the first pass.
    pub fn resolve(
        &self,
        product: &mut ProductDefinition,
        config: Config,
        workbook: &mut dyn Workbook,
        sheet: &str,
    ) -> Result<Resolution, EngineError> {
        let mut current = config;

        for pass in 1..=self.max_passes {
            let (next, formula_errors) = self.pass(product, &current, workbook, sheet)?;

            if next == current {
                debug!("{} resolved after {} pass(es)", product.name, pass);
                return Ok(Resolution::Resolved(ResolvedConfig {
                    config: next,
                    passes: pass,
                    formula_errors,
                }));
            }

            current = next;
        }

        warn!(
            "{} did not converge within {} passes",
            product.name, self.max_passes
        );
        Ok(Resolution::DidNotConverge {
            passes: self.max_passes,
            last: current,
        })
    }

    /// Run one pass, returning the adjusted config.
    fn pass(
        &self,
        product: &mut ProductDefinition,
        config: &Config,
        workbook: &mut dyn Workbook,
        sheet: &str,
    ) -> Result<(Config, Vec<FormulaError>), EngineError> {
        for param in &product.parameters {
            if let (Some(cell), Some(value)) = (&param.cell, config.get(&param.name)) {
                workbook.set_cell(sheet, cell, CellValue::from(value))?;
            }
        }

        let report = workbook.recalculate(RecalcOptions {
            continue_on_error: true,
        })?;

        let mut next = config.clone();

        for param in &mut product.parameters {
            if let Some(cell) = &param.enabled_cell {
                param.enabled = Some(workbook.get_cell(sheet, cell)?.is_enabled_flag());
            }

            let value = config.get(&param.name);

            match &mut param.kind {
                ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => {
                    resolve_bounds(&param.name, spec, &*workbook, sheet)?;
                    if let Some(clamped) = clamp(spec, value) {
                        next.insert(param.name.as_str(), clamped);
                    }
                }
                ParameterKind::Select { options } => {
                    for option in options.iter_mut() {
                        option.selected = false;
                        if let Some(cell) = &option.enabled_cell {
                            option.enabled =
                                Some(workbook.get_cell(sheet, cell)?.is_enabled_flag());
                        }
                    }

                    let chosen = choose_option(&param.name, param.enabled, options, value)?;
                    next.insert(param.name.as_str(), ParamValue::text(&chosen.value));
                }
            }
        }

        Ok((next, report.errors))
    }
}

/// Replace cell bounds by the numbers they hold.
///
/// Runs every pass but only reads a cell once: after that the bound is a
/// literal. A cell that does not hold a number leaves the bound open.
fn resolve_bounds(
    param: &str,
    spec: &mut NumericParameter,
    workbook: &dyn Workbook,
    sheet: &str,
) -> Result<(), EngineError> {
    for bound in [&mut spec.min, &mut spec.max] {
        let Some(Source::Cell(cell)) = bound.as_ref() else {
            continue;
        };

        let value = workbook.get_cell(sheet, cell)?;
        let resolved = value.as_decimal();
        if resolved.is_none() {
            warn!("{param}: bound cell {cell} holds '{value}', treating as unbounded");
        }
        *bound = resolved.map(Source::Literal);
    }

    if let (Some(min), Some(max)) = (literal(&spec.min), literal(&spec.max)) {
        if min > max {
            return Err(EngineError::InvalidBounds {
                parameter: param.to_string(),
                min,
                max,
            });
        }
    }

    Ok(())
}

fn literal(bound: &Option<Source<Decimal>>) -> Option<Decimal> {
    bound.as_ref().and_then(Source::literal).copied()
}

/// Clamped value, if `value` lies outside the resolved bounds.
///
/// Both checks look at the incoming value. Non-numeric values are left alone.
fn clamp(spec: &NumericParameter, value: Option<&ParamValue>) -> Option<ParamValue> {
    let n = value?.as_number()?;
    let mut clamped = None;

    if let Some(max) = literal(&spec.max) {
        if n > max {
            clamped = Some(ParamValue::Number(max));
        }
    }
    if let Some(min) = literal(&spec.min) {
        if n < min {
            clamped = Some(ParamValue::Number(min));
        }
    }

    clamped
}

/// Pick the option a select parameter resolves to.
///
/// A disabled parameter takes its fallback. Otherwise the candidate wins if
/// its option is available, else the first available option does.
fn choose_option<'a>(
    param: &str,
    enabled: Option<bool>,
    options: &'a [SelectOption],
    value: Option<&ParamValue>,
) -> Result<&'a SelectOption, EngineError> {
    if enabled == Some(false) {
        return options
            .iter()
            .find(|o| o.is_fallback)
            .ok_or_else(|| EngineError::MissingFallback {
                parameter: param.to_string(),
            });
    }

    options
        .iter()
        .find(|o| o.is_available() && value.is_some_and(|v| v.is_text(&o.value)))
        .or_else(|| options.iter().find(|o| o.is_available()))
        .ok_or_else(|| EngineError::NoSelectableOption {
            parameter: param.to_string(),
        })
}
