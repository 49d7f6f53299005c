//! Transfer engine: consume at the source location, recreate at the
//! destination.
//!
//! Unlike plain consumption this cannot be planned up front: each drawn lot is
//! immediately re-materialised at the destination, and a rejected destination
//! save stops the line right there, leaving earlier draws applied.

use rust_decimal::Decimal;

use stockyard_core::{LocationId, LotId, Rounding};
use stockyard_warehouse::{AllocationPolicy, Document, Location, Lot, Position};

use crate::consume::draw_position;
use crate::convert::to_given_unit;
use crate::error::AllocationError;
use crate::outcome::LineResult;
use crate::process::Allocator;
use crate::store::{StorageLocationResolver, UnitDictionary};

/// Build the destination-side lot for `quantity` drawn from `source`.
///
/// Batch, dates, price, code and unit context carry over; pallet fields do
/// not, and the storage slot is re-resolved for the destination location.
pub fn build_transfer_lot(
    document: &Document,
    to: LocationId,
    source: &Lot,
    quantity: Decimal,
    storage_locations: &dyn StorageLocationResolver,
    units: &dyn UnitDictionary,
    rounding: Rounding,
) -> Lot {
    Lot {
        id: LotId::new(),
        product: source.product,
        location: to,
        quantity,
        available_quantity: quantity,
        reserved_quantity: Decimal::ZERO,
        conversion: source.conversion,
        given_unit: source.given_unit.clone(),
        quantity_in_given_unit: to_given_unit(
            quantity,
            source.conversion,
            &source.given_unit,
            units,
            rounding,
        ),
        price: source.price,
        batch: source.batch.clone(),
        production_date: source.production_date,
        expiration_date: source.expiration_date,
        storage_location: storage_locations.find(to, source.product),
        pallet_number: None,
        type_of_pallet: None,
        additional_code: source.additional_code.clone(),
        waste: source.waste,
        received_at: document.time,
        user_name: Some(document.user.display_name()),
        delivery_number: document.delivery_number.clone(),
    }
}

impl Allocator<'_> {
    /// Move one request line from `from` to `to` under `policy`.
    ///
    /// Source-side writes follow the consumption rules (delete on full drain,
    /// otherwise shrink; reserved stock never disappears). Insufficient source
    /// stock fails the line before any draw. A rejected source save is fatal;
    /// a rejected destination save rejects only this line.
    pub(crate) fn move_line(
        &self,
        document: &Document,
        from: &Location,
        to: &Location,
        position: &Position,
        policy: AllocationPolicy,
    ) -> Result<LineResult, AllocationError> {
        let candidates = self.select_candidates(from.id, position, policy);

        let total: Decimal = candidates.iter().map(|lot| lot.available_quantity).sum();
        if total < position.quantity {
            return Ok(LineResult::Shortfall { requested: position.quantity });
        }

        let mut remaining = position.quantity;
        let mut positions = Vec::new();

        for mut lot in candidates {
            let available = lot.available_quantity;
            let mut result = draw_position(position, &lot);

            if remaining >= available {
                remaining -= available;

                if lot.quantity <= available {
                    result.lot = None;
                    self.store.delete(lot.id);
                    if let Some(pallet) = &lot.pallet_number {
                        self.pallets.try_dispose(pallet);
                    }
                } else {
                    lot.quantity -= available;
                    lot.available_quantity = Decimal::ZERO;
                    lot.quantity_in_given_unit = to_given_unit(
                        lot.quantity,
                        lot.conversion,
                        &lot.given_unit,
                        self.units,
                        self.rounding,
                    );
                    self.store
                        .save(lot.clone())
                        .map_err(|errors| AllocationError::InvalidLot { errors })?;
                }

                result.quantity = self.rounding.set_scale(available);
                result.given_quantity = to_given_unit(
                    available,
                    position.conversion,
                    &position.given_unit,
                    self.units,
                    self.rounding,
                );
                positions.push(result);

                let destination = build_transfer_lot(
                    document,
                    to.id,
                    &lot,
                    available,
                    self.storage_locations,
                    self.units,
                    self.rounding,
                );
                if let Err(errors) = self.store.save(destination) {
                    return Ok(LineResult::Rejected { errors });
                }

                if remaining.is_zero() {
                    return Ok(LineResult::Fulfilled { positions });
                }
            } else {
                lot.quantity -= remaining;
                lot.available_quantity -= remaining;
                if position.lot.is_some() && self.reservations.enabled() {
                    lot.reserved_quantity -= remaining;
                }
                lot.quantity_in_given_unit = to_given_unit(
                    lot.quantity,
                    lot.conversion,
                    &lot.given_unit,
                    self.units,
                    self.rounding,
                );
                lot.quantity = self.rounding.set_scale(lot.quantity);
                self.store
                    .save(lot.clone())
                    .map_err(|errors| AllocationError::InvalidLot { errors })?;

                result.quantity = self.rounding.set_scale(remaining);
                result.given_quantity = to_given_unit(
                    remaining,
                    position.conversion,
                    &position.given_unit,
                    self.units,
                    self.rounding,
                );
                positions.push(result);

                let destination = build_transfer_lot(
                    document,
                    to.id,
                    &lot,
                    remaining,
                    self.storage_locations,
                    self.units,
                    self.rounding,
                );
                return match self.store.save(destination) {
                    Ok(_) => Ok(LineResult::Fulfilled { positions }),
                    Err(errors) => Ok(LineResult::Rejected { errors }),
                };
            }
        }

        Ok(LineResult::Shortfall { requested: position.quantity })
    }
}
