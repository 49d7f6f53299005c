use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, LocationId, ProductId, StorageLocationId};

use crate::policy::AllocationPolicy;

/// A warehouse. Carries the allocation policy its outbound documents use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub number: String,
    pub policy: AllocationPolicy,
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A slot inside a warehouse where a product is normally stored.
///
/// Mapped per (location, product); transfers re-resolve the destination slot
/// through this mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: StorageLocationId,
    pub number: String,
    pub location: LocationId,
    pub product: Option<ProductId>,
}

impl Entity for StorageLocation {
    type Id = StorageLocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
