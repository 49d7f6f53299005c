use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::{LotId, PositionId};

/// Externally managed pre-commitment of lot quantity to one request line.
///
/// The allocation engine only ever reads the reservation for a line and asks
/// for its release on success; it never creates reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub position: PositionId,
    pub lot: Option<LotId>,
    pub quantity: Decimal,
}
