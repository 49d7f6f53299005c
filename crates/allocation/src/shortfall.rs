//! Shortfall accounting: how much stock a failed request was actually short.
//!
//! Runs only when at least one request line failed. Per failed product it
//! computes the quantity presently in the warehouse (policy-aware: a manual
//! explicit pick counts only its own lot) and reports the deficit, aggregated
//! into one payload per document.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{LocationId, ProductId};
use stockyard_products::Product;
use stockyard_warehouse::{Location, Position};

use crate::process::Allocator;

/// Deficit of one product across all failed lines of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallEntry {
    pub product: ProductId,
    pub product_number: String,
    pub deficit: Decimal,
}

/// Consolidated per-product deficit report for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallReport {
    /// Number of the warehouse the stock was requested from.
    pub location: String,
    pub entries: Vec<ShortfallEntry>,
}

impl ShortfallReport {
    pub fn new(location: &Location) -> Self {
        Self {
            location: location.number.clone(),
            entries: Vec::new(),
        }
    }

    /// Add a deficit for a product, merging with an existing entry.
    pub fn add_entry(&mut self, product: &Product, deficit: Decimal) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product == product.id) {
            entry.deficit += deficit;
        } else {
            self.entries.push(ShortfallEntry {
                product: product.id,
                product_number: product.number.clone(),
                deficit,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Allocator<'_> {
    /// Quantity presently in the warehouse for a failed line.
    ///
    /// Manual policy with an explicit pick counts only that lot; every other
    /// case sums available quantity over the affinity-filtered eligible set,
    /// cached per product across the document's failed lines. Any open
    /// reservation for the line counts as available again in both cases.
    pub(crate) fn quantity_in_warehouse(
        &self,
        location: LocationId,
        position: &Position,
        manual: bool,
        per_product: &mut HashMap<ProductId, Decimal>,
    ) -> Decimal {
        let reserved = self
            .reservations
            .reservation_for(position)
            .map(|r| r.quantity)
            .unwrap_or(Decimal::ZERO);

        let stocked = if manual {
            self.manual_quantity(location, position)
        } else {
            *per_product
                .entry(position.product.id)
                .or_insert_with(|| self.policy_quantity(location, position))
        };

        stocked + reserved
    }

    /// Manual accounting: the explicit lot's available quantity, or the plain
    /// per-product sum when the line names no (surviving) lot.
    fn manual_quantity(&self, location: LocationId, position: &Position) -> Decimal {
        if let Some(lot) = position.lot.and_then(|id| self.store.get(id)) {
            return lot.available_quantity;
        }

        let query = crate::store::LotQuery::for_product(location, position.product.id);
        self.store
            .find(&query)
            .iter()
            .map(|lot| lot.available_quantity)
            .sum()
    }

    /// Policy accounting: sum over the same affinity-filtered candidate set
    /// the selector would use (without ordering).
    fn policy_quantity(&self, location: LocationId, position: &Position) -> Decimal {
        self.find_with_affinity(location, position, Vec::new())
            .iter()
            .map(|lot| lot.available_quantity)
            .sum()
    }
}
