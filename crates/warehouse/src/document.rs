use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{LotId, PositionId, StorageLocationId};
use stockyard_products::Product;

use crate::location::Location;
use crate::lot::PalletNumber;

/// Warehouse document type; decides which engine processes the positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Inbound from outside: creates lots at `location_to`.
    Receipt,
    /// Inbound from another department: creates lots at `location_to`.
    InternalInbound,
    /// Outbound to another department: consumes lots at `location_from`.
    InternalOutbound,
    /// Outbound to outside: consumes lots at `location_from`.
    Release,
    /// Moves lots from `location_from` to `location_to`.
    Transfer,
}

/// The user issuing a document. Their display name is stamped onto created lots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One request line of a document.
///
/// Ephemeral: lives only for the duration of document processing. The engine
/// replaces a line with several result lines when it draws from more than one
/// lot, or rewrites it in place when exactly one lot satisfies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Option<PositionId>,
    pub product: Product,
    /// Requested quantity, base unit.
    pub quantity: Decimal,
    /// Requested quantity expressed in `given_unit`.
    pub given_quantity: Decimal,
    pub given_unit: String,
    /// Factor from base unit to `given_unit`.
    pub conversion: Decimal,
    /// Explicit lot pick before processing; back-reference to the consumed
    /// (or created) lot afterwards.
    pub lot: Option<LotId>,
    pub additional_code: Option<String>,
    pub storage_location: Option<StorageLocationId>,
    pub pallet_number: Option<PalletNumber>,
    pub type_of_pallet: Option<String>,
    pub batch: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
    pub waste: bool,
}

impl Position {
    /// Minimal request line; the optional attributes default to empty.
    pub fn request(product: Product, quantity: Decimal, given_unit: impl Into<String>, conversion: Decimal) -> Self {
        Self {
            id: Some(PositionId::new()),
            product,
            quantity,
            given_quantity: quantity * conversion,
            given_unit: given_unit.into(),
            conversion,
            lot: None,
            additional_code: None,
            storage_location: None,
            pallet_number: None,
            type_of_pallet: None,
            batch: None,
            production_date: None,
            expiration_date: None,
            price: None,
            waste: false,
        }
    }

    /// Rewrite this line with the values of the single result line that
    /// satisfied it, keeping the line's identity.
    pub fn copy_allocation_fields(&mut self, result: &Position) {
        self.price = result.price;
        self.batch = result.batch.clone();
        self.production_date = result.production_date;
        self.expiration_date = result.expiration_date;
        self.lot = result.lot;
        self.storage_location = result.storage_location;
        self.additional_code = result.additional_code.clone();
        self.pallet_number = result.pallet_number.clone();
        self.type_of_pallet = result.type_of_pallet.clone();
        self.waste = result.waste;
        self.quantity = result.quantity;
        self.given_quantity = result.given_quantity;
    }
}

/// A warehouse document: type, locations, timestamp, user, request lines.
///
/// The engine never mutates a document beyond rewriting its positions with
/// allocation results; validity is reported through the processing outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub document_type: DocumentType,
    pub location_from: Option<Location>,
    pub location_to: Option<Location>,
    pub time: DateTime<Utc>,
    pub user: User,
    pub delivery_number: Option<String>,
    pub positions: Vec<Position>,
}
