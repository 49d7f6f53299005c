//! Receipt engine: turn an inbound request line into a new lot.

use rust_decimal::Decimal;

use stockyard_core::{LocationId, LotId};
use stockyard_warehouse::{Document, Lot, Position};

use crate::error::AllocationError;
use crate::process::Allocator;

/// Build the lot an inbound line creates at `location`. Pure construction;
/// persistence and validation stay with the store.
///
/// Unit resolution: a product without a secondary unit is stored with its base
/// unit, conversion 1 and the base quantity; otherwise the line's given-unit
/// fields are copied verbatim.
pub fn build_receipt_lot(document: &Document, location: LocationId, position: &Position) -> Lot {
    let product = &position.product;

    let (given_unit, quantity_in_given_unit, conversion) = if product.has_additional_unit() {
        (position.given_unit.clone(), position.given_quantity, position.conversion)
    } else {
        (product.unit.clone(), position.quantity, Decimal::ONE)
    };

    Lot {
        id: LotId::new(),
        product: product.id,
        location,
        quantity: position.quantity,
        available_quantity: position.quantity,
        reserved_quantity: Decimal::ZERO,
        conversion,
        given_unit,
        quantity_in_given_unit,
        price: position.price,
        batch: position.batch.clone(),
        production_date: position.production_date,
        expiration_date: position.expiration_date,
        storage_location: position.storage_location,
        pallet_number: position.pallet_number.clone(),
        type_of_pallet: position.type_of_pallet.clone(),
        additional_code: position.additional_code.clone(),
        waste: position.waste,
        received_at: document.time,
        user_name: Some(document.user.display_name()),
        delivery_number: document.delivery_number.clone(),
    }
}

impl Allocator<'_> {
    /// Create and persist the lot for one inbound line, writing the new lot's
    /// id back onto the line. A rejected save is fatal for the whole receipt.
    pub fn receive(
        &self,
        document: &Document,
        location: LocationId,
        position: &mut Position,
    ) -> Result<Lot, AllocationError> {
        let lot = build_receipt_lot(document, location, position);
        let saved = self
            .store
            .save(lot)
            .map_err(|errors| AllocationError::InvalidLot { errors })?;

        position.lot = Some(saved.id);

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::product;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use stockyard_warehouse::{DocumentType, PalletNumber, User};

    fn document() -> Document {
        Document {
            document_type: DocumentType::Receipt,
            location_from: None,
            location_to: None,
            time: Utc::now(),
            user: User {
                first_name: "Jan".to_string(),
                last_name: "Kowalski".to_string(),
            },
            delivery_number: Some("DLV-42".to_string()),
            positions: Vec::new(),
        }
    }

    #[test]
    fn base_unit_product_gets_identity_conversion() {
        let doc = document();
        let location = LocationId::new();
        let mut line = Position::request(product("P-1"), dec!(25), "szt", dec!(4));
        line.batch = Some("B-1".to_string());
        line.price = Some(dec!(3.20));
        line.pallet_number = Some(PalletNumber::new("PAL-7"));

        let lot = build_receipt_lot(&doc, location, &line);

        assert_eq!(lot.quantity, dec!(25));
        assert_eq!(lot.available_quantity, dec!(25));
        assert_eq!(lot.reserved_quantity, dec!(0));
        // No secondary unit on the product: the line's given unit is ignored.
        assert_eq!(lot.given_unit, "kg");
        assert_eq!(lot.conversion, dec!(1));
        assert_eq!(lot.quantity_in_given_unit, dec!(25));
        assert_eq!(lot.batch.as_deref(), Some("B-1"));
        assert_eq!(lot.price, Some(dec!(3.20)));
        assert_eq!(lot.pallet_number, Some(PalletNumber::new("PAL-7")));
        assert_eq!(lot.user_name.as_deref(), Some("Jan Kowalski"));
        assert_eq!(lot.delivery_number.as_deref(), Some("DLV-42"));
        assert_eq!(lot.received_at, doc.time);
    }

    #[test]
    fn secondary_unit_product_copies_given_unit_fields() {
        let doc = document();
        let location = LocationId::new();
        let mut prod = product("P-2");
        prod.additional_unit = Some("szt".to_string());

        let line = Position::request(prod, dec!(25), "szt", dec!(4));

        let lot = build_receipt_lot(&doc, location, &line);

        assert_eq!(lot.given_unit, "szt");
        assert_eq!(lot.conversion, dec!(4));
        assert_eq!(lot.quantity_in_given_unit, dec!(100));
    }
}
