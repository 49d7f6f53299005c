//! Base-unit to given-unit quantity conversion.

use rust_decimal::Decimal;

use stockyard_core::Rounding;

use crate::store::UnitDictionary;

/// Convert a base-unit quantity into the given unit.
///
/// Multiplies by the conversion factor, then rounds: integer-valued units to
/// whole numbers, everything else to the standard scale. Defined for all
/// non-negative inputs; never fails.
pub fn to_given_unit(
    quantity: Decimal,
    conversion: Decimal,
    unit: &str,
    units: &dyn UnitDictionary,
    rounding: Rounding,
) -> Decimal {
    let converted = quantity * conversion;

    if units.is_integer_unit(unit) {
        rounding.set_integer_scale(converted)
    } else {
        rounding.set_scale(converted)
    }
}
