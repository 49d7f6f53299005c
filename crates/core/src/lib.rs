//! `stockyard-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod rounding;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationErrors};
pub use id::{LocationId, LotId, PositionId, ProductId, StorageLocationId};
pub use rounding::Rounding;
