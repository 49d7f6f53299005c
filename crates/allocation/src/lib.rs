//! stockyard-allocation: the resource allocation engine.
//!
//! Takes a warehouse document, selects lots under the source location's
//! policy, consumes or creates stock, and reports per-line results plus a
//! consolidated shortfall payload. All persistence goes through the seams in
//! [`store`]; `stockyard-infra` provides in-memory implementations.

pub mod consume;
pub mod convert;
pub mod error;
pub mod outcome;
pub mod process;
pub mod receipt;
pub mod selector;
pub mod shortfall;
pub mod store;
pub mod transfer;

#[cfg(test)]
pub(crate) mod testing;

pub use consume::{ConsumeOutcome, ConsumptionPlan, LotMutation};
pub use error::AllocationError;
pub use outcome::{DocumentOutcome, LineResult};
pub use process::Allocator;
pub use receipt::build_receipt_lot;
pub use shortfall::{ShortfallEntry, ShortfallReport};
pub use store::{
    CodeAffinity, Direction, LotOrdering, LotQuery, LotStore, PalletDisposalService,
    ReservationService, SortKey, StorageLocationResolver, UnitDictionary,
};
pub use transfer::build_transfer_lot;
