use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, LocationId, LotId, ProductId, StorageLocationId};

/// Pallet number attached to a lot; released back to the pool when the lot is drained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PalletNumber(pub String);

impl PalletNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PalletNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A lot: a quantity of one product sitting at one location.
///
/// Quantities are kept in the product's base unit; `quantity_in_given_unit`
/// is the same amount expressed in `given_unit` via `conversion`.
///
/// Invariant: `0 <= available_quantity <= quantity`. At rest (no in-flight
/// reservation release) `available_quantity + reserved_quantity == quantity`.
/// A lot never survives a consumption at `quantity == 0`; it is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub product: ProductId,
    pub location: LocationId,
    /// Total remaining quantity, base unit.
    pub quantity: Decimal,
    /// Unreserved remaining quantity, base unit.
    pub available_quantity: Decimal,
    /// Quantity earmarked by reservations.
    pub reserved_quantity: Decimal,
    /// Factor from base unit to `given_unit`.
    pub conversion: Decimal,
    pub given_unit: String,
    pub quantity_in_given_unit: Decimal,
    pub price: Option<Decimal>,
    pub batch: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub storage_location: Option<StorageLocationId>,
    pub pallet_number: Option<PalletNumber>,
    pub type_of_pallet: Option<String>,
    pub additional_code: Option<String>,
    pub waste: bool,
    /// Receipt timestamp; ordering key for FIFO/LIFO.
    pub received_at: DateTime<Utc>,
    /// Display name of the user who received the lot.
    pub user_name: Option<String>,
    pub delivery_number: Option<String>,
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lot_round_trips_through_serde() {
        let lot = Lot {
            id: LotId::new(),
            product: ProductId::new(),
            location: LocationId::new(),
            quantity: dec!(10),
            available_quantity: dec!(7),
            reserved_quantity: dec!(3),
            conversion: dec!(1),
            given_unit: "kg".to_string(),
            quantity_in_given_unit: dec!(10),
            price: Some(dec!(19.99)),
            batch: Some("B-7".to_string()),
            production_date: None,
            expiration_date: None,
            storage_location: None,
            pallet_number: Some(PalletNumber::new("PAL-1")),
            type_of_pallet: None,
            additional_code: None,
            waste: false,
            received_at: Utc::now(),
            user_name: Some("Jan Kowalski".to_string()),
            delivery_number: None,
        };

        let json = serde_json::to_string(&lot).unwrap();
        let back: Lot = serde_json::from_str(&json).unwrap();
        assert_eq!(lot, back);
    }
}
