//! `stockyard-warehouse` — warehouse entities: lots, documents, locations.

pub mod document;
pub mod location;
pub mod lot;
pub mod policy;
pub mod reservation;

pub use document::{Document, DocumentType, Position, User};
pub use location::{Location, StorageLocation};
pub use lot::{Lot, PalletNumber};
pub use policy::AllocationPolicy;
pub use reservation::Reservation;
