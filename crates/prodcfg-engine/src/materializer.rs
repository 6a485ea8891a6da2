//! Product materializer.
//!
//! Turns a resolved config and the annotated product copy into the
//! render-ready [`ConfiguredProduct`].

use rust_decimal::Decimal;

use prodcfg_core::types::{PriceTier, ResolvedPrice};
use prodcfg_core::{
    CellValue, Config, ConfiguredProduct, ParamValue, ParameterKind, ProductDefinition, Source,
};
use prodcfg_traits::spreadsheet::Workbook;

use crate::codec;
use crate::error::EngineError;

/// Build the configured product.
///
/// Literal weights and literal price quantities are multiplied by the
/// quantity (by one without a quantity parameter); cell references are read
/// from the recalculated workbook as they are. Price ids never scale.
pub fn finalize(
    mut product: ProductDefinition,
    config: &Config,
    workbook: &dyn Workbook,
    sheet: &str,
) -> Result<ConfiguredProduct, EngineError> {
    for param in &mut product.parameters {
        let value = config.get(&param.name);

        match &mut param.kind {
            ParameterKind::Select { options } => {
                let chosen = options
                    .iter_mut()
                    .find(|o| value.is_some_and(|v| v.is_text(&o.value)))
                    .ok_or_else(|| EngineError::NoSelectableOption {
                        parameter: param.name.clone(),
                    })?;
                chosen.selected = true;
            }
            ParameterKind::Number(spec) | ParameterKind::Quantity(spec) => {
                if let Some(n) = value.and_then(ParamValue::as_number) {
                    spec.value = n;
                }
            }
        }
    }

    let config_path = codec::serialize(config, &product.parameter_names());

    let quantity = product
        .quantity_parameter()
        .and_then(|p| config.get(&p.name))
        .and_then(ParamValue::as_nonzero_number);
    let multiplier = quantity.unwrap_or(Decimal::ONE);

    let weight = match &product.weight {
        Source::Cell(cell) => workbook.get_cell(sheet, cell)?,
        Source::Literal(w) => CellValue::Number(scale(*w, multiplier, "weight")?),
    };

    let prices = product
        .prices
        .iter()
        .map(|tier| resolve_price(tier, multiplier, workbook, sheet))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConfiguredProduct {
        name: product.name,
        parameters: product.parameters,
        config_path,
        quantity,
        weight,
        prices,
        workbook: product.workbook,
        attributes: product.attributes,
    })
}

fn resolve_price(
    tier: &PriceTier,
    multiplier: Decimal,
    workbook: &dyn Workbook,
    sheet: &str,
) -> Result<ResolvedPrice, EngineError> {
    let id = match &tier.id {
        Source::Cell(cell) => workbook.get_cell(sheet, cell)?,
        Source::Literal(id) => CellValue::Number(*id),
    };
    let qty = match &tier.qty {
        Source::Cell(cell) => workbook.get_cell(sheet, cell)?,
        Source::Literal(qty) => CellValue::Number(scale(*qty, multiplier, "price quantity")?),
    };
    Ok(ResolvedPrice { id, qty })
}

fn scale(value: Decimal, multiplier: Decimal, what: &str) -> Result<Decimal, EngineError> {
    value
        .checked_mul(multiplier)
        .ok_or_else(|| EngineError::CalculationError(format!("{what} overflows")))
}
