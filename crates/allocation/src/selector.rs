//! Lot selection: which lots a request line may draw from, and in what order.

use rust_decimal::Decimal;

use stockyard_core::LocationId;
use stockyard_warehouse::{AllocationPolicy, Lot, Position};

use crate::process::Allocator;
use crate::store::{CodeAffinity, LotOrdering, LotQuery, SortKey};

/// Ordering keys for a policy. Each policy is a pure ordering over the same
/// eligibility-filtered set; MANUAL without an explicit lot behaves like FIFO.
pub(crate) fn policy_orderings(policy: AllocationPolicy) -> Vec<LotOrdering> {
    match policy {
        AllocationPolicy::Fifo | AllocationPolicy::Manual => {
            vec![LotOrdering::asc(SortKey::ReceivedAt)]
        }
        AllocationPolicy::Lifo => vec![LotOrdering::desc(SortKey::ReceivedAt)],
        AllocationPolicy::Fefo => vec![
            LotOrdering::asc(SortKey::ExpirationDate),
            LotOrdering::asc(SortKey::AvailableQuantity),
        ],
        AllocationPolicy::Lefo => vec![
            LotOrdering::desc(SortKey::ExpirationDate),
            LotOrdering::asc(SortKey::AvailableQuantity),
        ],
    }
}

impl Allocator<'_> {
    /// Ordered candidate list for one request line.
    ///
    /// An explicit lot on the line always wins, regardless of policy: the lot
    /// is re-fetched fresh, and if a reservation is tied to the line its held
    /// quantity is counted as available again (the hold is released as part of
    /// this allocation). A vanished explicit lot falls through to the policy
    /// path.
    pub fn select_candidates(
        &self,
        location: LocationId,
        position: &Position,
        policy: AllocationPolicy,
    ) -> Vec<Lot> {
        if let Some(lot_id) = position.lot {
            if let Some(mut lot) = self.store.get(lot_id) {
                if let Some(reservation) = self.reservations.reservation_for(position) {
                    lot.available_quantity += reservation.quantity;
                }
                return vec![lot];
            }
        }

        self.find_with_affinity(location, position, policy_orderings(policy))
    }

    /// Tiered additional-code affinity over the eligible set: lots with the
    /// line's code first, then lots with a different or absent code; lines
    /// without a code (or an empty concatenation) use the full eligible set.
    pub(crate) fn find_with_affinity(
        &self,
        location: LocationId,
        position: &Position,
        order: Vec<LotOrdering>,
    ) -> Vec<Lot> {
        let base = self.eligible_query(location, position).ordered_by(order);

        if let Some(code) = &position.additional_code {
            let mut lots = self
                .store
                .find(&base.clone().with_code(CodeAffinity::Matching(code.clone())));
            lots.extend(
                self.store
                    .find(&base.clone().with_code(CodeAffinity::Other(code.clone()))),
            );
            if !lots.is_empty() {
                return lots;
            }
        }

        self.store.find(&base)
    }

    /// Eligibility filter shared by selection and shortfall accounting:
    /// location + product + available stock, with the line's conversion when
    /// the product has a secondary unit and exactly 1 otherwise.
    pub(crate) fn eligible_query(&self, location: LocationId, position: &Position) -> LotQuery {
        let conversion = if position.product.has_additional_unit() {
            position.conversion
        } else {
            Decimal::ONE
        };
        LotQuery::for_product(location, position.product.id).with_conversion(conversion)
    }
}
