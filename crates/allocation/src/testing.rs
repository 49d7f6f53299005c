//! Test doubles shared by the unit tests in this crate.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;

use stockyard_core::{LocationId, LotId, PositionId, ProductId, StorageLocationId, ValidationErrors};
use stockyard_products::Product;
use stockyard_warehouse::{Lot, PalletNumber, Position, Reservation};

use crate::store::{
    LotQuery, LotStore, PalletDisposalService, ReservationService, StorageLocationResolver,
    UnitDictionary,
};

pub(crate) fn product(number: &str) -> Product {
    Product {
        id: ProductId::new(),
        number: number.to_string(),
        name: number.to_string(),
        unit: "kg".to_string(),
        additional_unit: None,
    }
}

pub(crate) fn lot_at(
    location: LocationId,
    product: ProductId,
    quantity: Decimal,
    available: Decimal,
) -> Lot {
    Lot {
        id: LotId::new(),
        product,
        location,
        quantity,
        available_quantity: available,
        reserved_quantity: quantity - available,
        conversion: Decimal::ONE,
        given_unit: "kg".to_string(),
        quantity_in_given_unit: quantity,
        price: None,
        batch: None,
        production_date: None,
        expiration_date: None,
        storage_location: None,
        pallet_number: None,
        type_of_pallet: None,
        additional_code: None,
        waste: false,
        received_at: Utc::now(),
        user_name: None,
        delivery_number: None,
    }
}

/// Single-threaded in-crate lot store; `stockyard-infra` has the real one.
#[derive(Debug, Default)]
pub(crate) struct TestStore {
    lots: RefCell<BTreeMap<LotId, Lot>>,
    reject_saves_with: RefCell<Option<ValidationErrors>>,
}

impl TestStore {
    pub(crate) fn with_lots(lots: impl IntoIterator<Item = Lot>) -> Self {
        let store = Self::default();
        {
            let mut map = store.lots.borrow_mut();
            for lot in lots {
                map.insert(lot.id, lot);
            }
        }
        store
    }

    pub(crate) fn reject_saves_with(&self, errors: ValidationErrors) {
        *self.reject_saves_with.borrow_mut() = Some(errors);
    }

    pub(crate) fn lot(&self, id: LotId) -> Option<Lot> {
        self.lots.borrow().get(&id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.lots.borrow().len()
    }
}

impl LotStore for TestStore {
    fn find(&self, query: &LotQuery) -> Vec<Lot> {
        let mut lots: Vec<Lot> = self
            .lots
            .borrow()
            .values()
            .filter(|lot| query.matches(lot))
            .cloned()
            .collect();
        lots.sort_by(|a, b| query.compare(a, b));
        lots
    }

    fn get(&self, id: LotId) -> Option<Lot> {
        self.lots.borrow().get(&id).cloned()
    }

    fn save(&self, lot: Lot) -> Result<Lot, ValidationErrors> {
        if let Some(errors) = self.reject_saves_with.borrow().clone() {
            return Err(errors);
        }
        self.lots.borrow_mut().insert(lot.id, lot.clone());
        Ok(lot)
    }

    fn delete(&self, id: LotId) {
        self.lots.borrow_mut().remove(&id);
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestReservations {
    by_position: HashMap<PositionId, Reservation>,
    enabled: bool,
    released: RefCell<Vec<PositionId>>,
}

impl TestReservations {
    pub(crate) fn disabled() -> Self {
        Self::default()
    }

    pub(crate) fn enabled_with(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        Self {
            by_position: reservations.into_iter().map(|r| (r.position, r)).collect(),
            enabled: true,
            released: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn released(&self) -> Vec<PositionId> {
        self.released.borrow().clone()
    }
}

impl ReservationService for TestReservations {
    fn reservation_for(&self, position: &Position) -> Option<Reservation> {
        position.id.and_then(|id| self.by_position.get(&id).cloned())
    }

    fn release(&self, position: &Position) {
        if let Some(id) = position.id {
            self.released.borrow_mut().push(id);
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestPallets {
    disposed: RefCell<Vec<PalletNumber>>,
}

impl TestPallets {
    pub(crate) fn disposed(&self) -> Vec<PalletNumber> {
        self.disposed.borrow().clone()
    }
}

impl PalletDisposalService for TestPallets {
    fn try_dispose(&self, pallet: &PalletNumber) {
        self.disposed.borrow_mut().push(pallet.clone());
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestUnits {
    integer: HashSet<String>,
}

impl TestUnits {
    pub(crate) fn integer(units: &[&str]) -> Self {
        Self {
            integer: units.iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl UnitDictionary for TestUnits {
    fn is_integer_unit(&self, unit: &str) -> bool {
        self.integer.contains(unit)
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestStorage {
    mapping: HashMap<(LocationId, ProductId), StorageLocationId>,
}

impl TestStorage {
    pub(crate) fn mapped(
        entries: impl IntoIterator<Item = ((LocationId, ProductId), StorageLocationId)>,
    ) -> Self {
        Self {
            mapping: entries.into_iter().collect(),
        }
    }
}

impl StorageLocationResolver for TestStorage {
    fn find(&self, location: LocationId, product: ProductId) -> Option<StorageLocationId> {
        self.mapping.get(&(location, product)).copied()
    }
}
