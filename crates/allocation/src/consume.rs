//! Consumption planning: greedy draw over an ordered candidate list.
//!
//! The planner is pure. It walks the candidate snapshot, decides per lot
//! between full drain (delete or zero-out) and partial decrement, and returns
//! the lot mutations together with one result line per drawn lot. The
//! orchestrator applies the mutations through the store.

use rust_decimal::Decimal;

use stockyard_core::{LotId, Rounding};
use stockyard_warehouse::{Lot, PalletNumber, Position};

use crate::convert::to_given_unit;
use crate::store::UnitDictionary;

/// A single lot write the orchestrator must issue.
#[derive(Debug, Clone, PartialEq)]
pub enum LotMutation {
    Save(Lot),
    /// Remove the lot entirely and try to release its pallet.
    Delete { id: LotId, pallet: Option<PalletNumber> },
}

/// Mutations plus the result lines of a satisfied request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionPlan {
    pub mutations: Vec<LotMutation>,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsumeOutcome {
    Satisfied(ConsumptionPlan),
    /// Candidates ran out before the request was met. Nothing to apply.
    Shortfall,
}

/// Plan the consumption of `line.quantity` from `candidates`, in order.
pub fn plan(
    candidates: Vec<Lot>,
    line: &Position,
    reservations_enabled: bool,
    units: &dyn UnitDictionary,
    rounding: Rounding,
) -> ConsumeOutcome {
    let mut remaining = line.quantity;
    let mut mutations = Vec::new();
    let mut positions = Vec::new();

    for mut lot in candidates {
        let available = lot.available_quantity;
        let mut result = draw_position(line, &lot);

        if remaining >= available {
            // Lot is exhausted (or exactly matched).
            remaining -= available;

            if lot.quantity <= available {
                // Nothing reserved beyond what is being taken: the lot goes away.
                result.lot = None;
                mutations.push(LotMutation::Delete {
                    id: lot.id,
                    pallet: lot.pallet_number.clone(),
                });
            } else {
                lot.quantity -= available;
                lot.available_quantity = Decimal::ZERO;
                lot.quantity_in_given_unit =
                    to_given_unit(lot.quantity, lot.conversion, &lot.given_unit, units, rounding);
                mutations.push(LotMutation::Save(lot));
            }

            result.quantity = rounding.set_scale(available);
            result.given_quantity =
                to_given_unit(available, line.conversion, &line.given_unit, units, rounding);
            positions.push(result);

            if remaining.is_zero() {
                return ConsumeOutcome::Satisfied(ConsumptionPlan { mutations, positions });
            }
        } else {
            // Lot has enough to finish the request.
            lot.quantity -= remaining;
            lot.available_quantity -= remaining;

            // An explicit pick fulfils its reservation in place.
            if line.lot.is_some() && reservations_enabled {
                lot.reserved_quantity -= remaining;
            }

            lot.quantity_in_given_unit =
                to_given_unit(lot.quantity, lot.conversion, &lot.given_unit, units, rounding);
            lot.quantity = rounding.set_scale(lot.quantity);
            mutations.push(LotMutation::Save(lot));

            result.quantity = rounding.set_scale(remaining);
            result.given_quantity =
                to_given_unit(remaining, line.conversion, &line.given_unit, units, rounding);
            positions.push(result);

            return ConsumeOutcome::Satisfied(ConsumptionPlan { mutations, positions });
        }
    }

    ConsumeOutcome::Shortfall
}

/// Result-line template: the request's unit context plus the drawn lot's
/// attributes (batch, dates, price, pallet, storage slot, waste flag).
pub(crate) fn draw_position(line: &Position, lot: &Lot) -> Position {
    Position {
        id: None,
        product: line.product.clone(),
        quantity: Decimal::ZERO,
        given_quantity: Decimal::ZERO,
        given_unit: line.given_unit.clone(),
        conversion: line.conversion,
        lot: Some(lot.id),
        additional_code: lot.additional_code.clone(),
        storage_location: lot.storage_location,
        pallet_number: lot.pallet_number.clone(),
        type_of_pallet: lot.type_of_pallet.clone(),
        batch: lot.batch.clone(),
        production_date: lot.production_date,
        expiration_date: lot.expiration_date,
        price: lot.price,
        waste: lot.waste,
    }
}
