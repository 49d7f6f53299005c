//! Infrastructure layer: adapters behind the allocation engine's seams.

pub mod memory;


pub use memory::{
    InMemoryLotStore, InMemoryReservations, InMemoryStorageLocations, RecordingPalletDisposal,
    StaticUnitDictionary,
};
