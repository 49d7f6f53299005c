//! In-memory adapters for the allocation engine's collaborator seams.
//!
//! Intended for tests/dev. Not optimized for performance; a database-backed
//! deployment replaces these behind the same traits.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use tracing::debug;

use stockyard_allocation::{
    LotQuery, LotStore, PalletDisposalService, ReservationService, StorageLocationResolver,
    UnitDictionary,
};
use stockyard_core::{LocationId, LotId, PositionId, ProductId, StorageLocationId, ValidationErrors};
use stockyard_warehouse::{Lot, PalletNumber, Position, Reservation, StorageLocation};

type SaveValidator = Box<dyn Fn(&Lot) -> Result<(), ValidationErrors> + Send + Sync>;

/// In-memory lot store with an optional save-time validator standing in for
/// the persistence layer's entity validation.
#[derive(Default)]
pub struct InMemoryLotStore {
    lots: RwLock<BTreeMap<LotId, Lot>>,
    validator: RwLock<Option<SaveValidator>>,
}

impl InMemoryLotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lots(lots: impl IntoIterator<Item = Lot>) -> Self {
        let store = Self::default();
        {
            let mut map = store.lots.write().unwrap();
            for lot in lots {
                map.insert(lot.id, lot);
            }
        }
        store
    }

    /// Install a validator consulted on every save. A save returning `Err`
    /// leaves the store untouched.
    pub fn validate_saves_with(
        &self,
        validator: impl Fn(&Lot) -> Result<(), ValidationErrors> + Send + Sync + 'static,
    ) {
        *self.validator.write().unwrap() = Some(Box::new(validator));
    }

    pub fn lot(&self, id: LotId) -> Option<Lot> {
        self.lots.read().unwrap().get(&id).cloned()
    }

    pub fn at_location(&self, location: LocationId) -> Vec<Lot> {
        self.lots
            .read()
            .unwrap()
            .values()
            .filter(|lot| lot.location == location)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lots.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.read().unwrap().is_empty()
    }
}

impl LotStore for InMemoryLotStore {
    fn find(&self, query: &LotQuery) -> Vec<Lot> {
        let mut lots: Vec<Lot> = self
            .lots
            .read()
            .unwrap()
            .values()
            .filter(|lot| query.matches(lot))
            .cloned()
            .collect();
        lots.sort_by(|a, b| query.compare(a, b));
        lots
    }

    fn get(&self, id: LotId) -> Option<Lot> {
        self.lots.read().unwrap().get(&id).cloned()
    }

    fn save(&self, lot: Lot) -> Result<Lot, ValidationErrors> {
        if let Some(validator) = self.validator.read().unwrap().as_ref() {
            validator(&lot)?;
        }
        self.lots.write().unwrap().insert(lot.id, lot.clone());
        Ok(lot)
    }

    fn delete(&self, id: LotId) {
        self.lots.write().unwrap().remove(&id);
    }
}

/// Reservation registry keyed by request line.
#[derive(Debug, Default)]
pub struct InMemoryReservations {
    enabled: bool,
    by_position: RwLock<HashMap<PositionId, Reservation>>,
    released: RwLock<Vec<PositionId>>,
}

impl InMemoryReservations {
    /// Reservations switched off, as on installations without draft-document
    /// holds.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled_with(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        Self {
            enabled: true,
            by_position: RwLock::new(
                reservations.into_iter().map(|r| (r.position, r)).collect(),
            ),
            released: RwLock::new(Vec::new()),
        }
    }

    pub fn released(&self) -> Vec<PositionId> {
        self.released.read().unwrap().clone()
    }
}

impl ReservationService for InMemoryReservations {
    fn reservation_for(&self, position: &Position) -> Option<Reservation> {
        let id = position.id?;
        self.by_position.read().unwrap().get(&id).cloned()
    }

    fn release(&self, position: &Position) {
        if let Some(id) = position.id {
            self.by_position.write().unwrap().remove(&id);
            self.released.write().unwrap().push(id);
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Records pallets freed when their last lot is deleted.
#[derive(Debug, Default)]
pub struct RecordingPalletDisposal {
    disposed: RwLock<Vec<PalletNumber>>,
}

impl RecordingPalletDisposal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disposed(&self) -> Vec<PalletNumber> {
        self.disposed.read().unwrap().clone()
    }
}

impl PalletDisposalService for RecordingPalletDisposal {
    fn try_dispose(&self, pallet: &PalletNumber) {
        debug!(pallet = %pallet.as_str(), "pallet freed");
        self.disposed.write().unwrap().push(pallet.clone());
    }
}

/// Fixed unit dictionary: a unit either carries whole numbers or decimals.
#[derive(Debug, Default)]
pub struct StaticUnitDictionary {
    integer_units: HashSet<String>,
}

impl StaticUnitDictionary {
    pub fn with_integer_units(units: &[&str]) -> Self {
        Self {
            integer_units: units.iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl UnitDictionary for StaticUnitDictionary {
    fn is_integer_unit(&self, unit: &str) -> bool {
        self.integer_units.contains(unit)
    }
}

/// Storage-slot lookup over a fixed slot list: per location, a product maps
/// to the first slot assigned to it.
#[derive(Debug, Default)]
pub struct InMemoryStorageLocations {
    slots: Vec<StorageLocation>,
}

impl InMemoryStorageLocations {
    pub fn new(slots: Vec<StorageLocation>) -> Self {
        Self { slots }
    }
}

impl StorageLocationResolver for InMemoryStorageLocations {
    fn find(&self, location: LocationId, product: ProductId) -> Option<StorageLocationId> {
        self.slots
            .iter()
            .find(|slot| slot.location == location && slot.product == Some(product))
            .map(|slot| slot.id)
    }
}
