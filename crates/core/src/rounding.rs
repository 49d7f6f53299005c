//! Decimal scale configuration shared by every quantity computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Standard number of decimal places for stored quantities.
pub const DEFAULT_SCALE: u32 = 5;

/// Fixed decimal precision applied to quantities before they are persisted.
///
/// Rounds half-up (midpoint away from zero). Integer-valued units are rounded
/// to zero decimal places instead of the standard scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounding {
    pub scale: u32,
}

impl Default for Rounding {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE }
    }
}

impl Rounding {
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }

    /// Round to the standard scale.
    pub fn set_scale(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Round to a whole number (integer units).
    pub fn set_integer_scale(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}
