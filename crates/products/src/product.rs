use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, ProductId};

/// Product record as the allocation engine sees it.
///
/// A product is stocked in its base `unit`. When `additional_unit` is set the
/// product is also expressed in a second unit of measure, and every lot carries
/// the conversion factor between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Catalog number, shown in shortfall reports.
    pub number: String,
    pub name: String,
    /// Base unit of measure (e.g. "kg").
    pub unit: String,
    /// Secondary unit of measure, if the product has one (e.g. "pallet").
    pub additional_unit: Option<String>,
}

impl Product {
    pub fn has_additional_unit(&self) -> bool {
        self.additional_unit.as_deref().is_some_and(|unit| !unit.is_empty())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
