//! Collaborator contracts the engine is wired against, and the lot query model.
//!
//! The engine performs no IO of its own; every read and write goes through one
//! of these traits. Implementations decide where lots actually live (the
//! in-process store in `stockyard-infra`, or whatever a caller brings).

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{LocationId, LotId, ProductId, StorageLocationId, ValidationErrors};
use stockyard_warehouse::{Lot, PalletNumber, Position, Reservation};

/// Entity store for lots.
///
/// `save` either persists the lot or rejects it with field-level validation
/// messages; the engine never retries a rejected save.
pub trait LotStore {
    fn find(&self, query: &LotQuery) -> Vec<Lot>;
    fn get(&self, id: LotId) -> Option<Lot>;
    fn save(&self, lot: Lot) -> Result<Lot, ValidationErrors>;
    fn delete(&self, id: LotId);
}

/// Reservation bookkeeping, owned elsewhere. The engine only reads the
/// reservation tied to a request line and asks for its release on success.
pub trait ReservationService {
    fn reservation_for(&self, position: &Position) -> Option<Reservation>;
    fn release(&self, position: &Position);
    fn enabled(&self) -> bool;
}

/// Best-effort pallet release when a lot is fully drained. Failures are the
/// disposal service's problem, not the engine's.
pub trait PalletDisposalService {
    fn try_dispose(&self, pallet: &PalletNumber);
}

/// Lookup for units that only come in whole numbers (pieces, pallets).
pub trait UnitDictionary {
    fn is_integer_unit(&self, unit: &str) -> bool;
}

/// Resolves the storage slot a product normally occupies at a location.
pub trait StorageLocationResolver {
    /// First configured mapping for (location, product), if any.
    fn find(&self, location: LocationId, product: ProductId) -> Option<StorageLocationId>;
}

/// Additional-code affinity filter of a lot query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeAffinity {
    /// No filtering on the additional code.
    Any,
    /// Only lots carrying exactly this code.
    Matching(String),
    /// Only lots carrying a different code, or none at all.
    Other(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    ReceivedAt,
    ExpirationDate,
    AvailableQuantity,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One ordering key of a lot query.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotOrdering {
    pub key: SortKey,
    pub direction: Direction,
}

impl LotOrdering {
    pub fn asc(key: SortKey) -> Self {
        Self { key, direction: Direction::Ascending }
    }

    pub fn desc(key: SortKey) -> Self {
        Self { key, direction: Direction::Descending }
    }
}

/// Value-struct lot query: which lots are eligible and in which order.
///
/// Every query is implicitly restricted to lots with `available_quantity > 0`.
/// The query owns its matching and comparison semantics so that all stores
/// agree on what a query means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotQuery {
    pub location: LocationId,
    pub product: ProductId,
    /// Required conversion factor, when the request constrains it.
    pub conversion: Option<Decimal>,
    pub code: CodeAffinity,
    pub order: Vec<LotOrdering>,
}

impl LotQuery {
    pub fn for_product(location: LocationId, product: ProductId) -> Self {
        Self {
            location,
            product,
            conversion: None,
            code: CodeAffinity::Any,
            order: Vec::new(),
        }
    }

    pub fn with_conversion(mut self, conversion: Decimal) -> Self {
        self.conversion = Some(conversion);
        self
    }

    pub fn with_code(mut self, code: CodeAffinity) -> Self {
        self.code = code;
        self
    }

    pub fn ordered_by(mut self, order: Vec<LotOrdering>) -> Self {
        self.order = order;
        self
    }

    /// Does this lot satisfy the query's filters?
    pub fn matches(&self, lot: &Lot) -> bool {
        if lot.location != self.location || lot.product != self.product {
            return false;
        }
        if lot.available_quantity <= Decimal::ZERO {
            return false;
        }
        if let Some(conversion) = self.conversion {
            if lot.conversion != conversion {
                return false;
            }
        }
        match &self.code {
            CodeAffinity::Any => true,
            CodeAffinity::Matching(code) => lot.additional_code.as_deref() == Some(code.as_str()),
            CodeAffinity::Other(code) => lot.additional_code.as_deref() != Some(code.as_str()),
        }
    }

    /// Total order of two lots under the query's ordering keys.
    ///
    /// Missing expiration dates sort last under ascending and first under
    /// descending, the way the original store's SQL ordering behaves.
    pub fn compare(&self, a: &Lot, b: &Lot) -> Ordering {
        for ordering in &self.order {
            let by_key = match ordering.key {
                SortKey::ReceivedAt => a.received_at.cmp(&b.received_at),
                SortKey::ExpirationDate => {
                    compare_nulls_last(a.expiration_date.as_ref(), b.expiration_date.as_ref())
                }
                SortKey::AvailableQuantity => a.available_quantity.cmp(&b.available_quantity),
            };
            let directed = match ordering.direction {
                Direction::Ascending => by_key,
                Direction::Descending => by_key.reverse(),
            };
            if directed != Ordering::Equal {
                return directed;
            }
        }
        Ordering::Equal
    }
}

/// Absent values rank greatest: last under ascending, first under descending.
fn compare_nulls_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::lot_at;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn matches_filters_location_product_and_availability() {
        let location = LocationId::new();
        let product = ProductId::new();
        let query = LotQuery::for_product(location, product);

        let mut lot = lot_at(location, product, dec!(10), dec!(10));
        assert!(query.matches(&lot));

        lot.available_quantity = Decimal::ZERO;
        assert!(!query.matches(&lot));

        let other_product = lot_at(location, ProductId::new(), dec!(10), dec!(10));
        assert!(!query.matches(&other_product));
    }

    #[test]
    fn conversion_filter_is_exact() {
        let location = LocationId::new();
        let product = ProductId::new();
        let query = LotQuery::for_product(location, product).with_conversion(dec!(0.5));

        let mut lot = lot_at(location, product, dec!(10), dec!(10));
        lot.conversion = dec!(0.5);
        assert!(query.matches(&lot));

        lot.conversion = dec!(1);
        assert!(!query.matches(&lot));
    }

    #[test]
    fn code_affinity_tiers_partition_the_eligible_set() {
        let location = LocationId::new();
        let product = ProductId::new();

        let mut coded = lot_at(location, product, dec!(1), dec!(1));
        coded.additional_code = Some("A1".to_string());
        let mut other = lot_at(location, product, dec!(1), dec!(1));
        other.additional_code = Some("B2".to_string());
        let blank = lot_at(location, product, dec!(1), dec!(1));

        let matching =
            LotQuery::for_product(location, product).with_code(CodeAffinity::Matching("A1".into()));
        let rest =
            LotQuery::for_product(location, product).with_code(CodeAffinity::Other("A1".into()));

        assert!(matching.matches(&coded));
        assert!(!matching.matches(&other));
        assert!(!matching.matches(&blank));

        assert!(!rest.matches(&coded));
        assert!(rest.matches(&other));
        assert!(rest.matches(&blank));
    }

    #[test]
    fn missing_expiration_sorts_last_ascending_first_descending() {
        let location = LocationId::new();
        let product = ProductId::new();

        let mut dated = lot_at(location, product, dec!(1), dec!(1));
        dated.expiration_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let undated = lot_at(location, product, dec!(1), dec!(1));

        let asc = LotQuery::for_product(location, product)
            .ordered_by(vec![LotOrdering::asc(SortKey::ExpirationDate)]);
        let desc = LotQuery::for_product(location, product)
            .ordered_by(vec![LotOrdering::desc(SortKey::ExpirationDate)]);

        assert_eq!(asc.compare(&dated, &undated), Ordering::Less);
        assert_eq!(desc.compare(&dated, &undated), Ordering::Greater);
    }
}
