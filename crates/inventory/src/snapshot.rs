use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, StaggerProfile};

/// Per-ingredient quantity on hand at horizon start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    quantities: BTreeMap<IngredientId, f64>,
}

impl InventorySnapshot {
    pub fn from_quantities(quantities: BTreeMap<IngredientId, f64>) -> Self {
        Self { quantities }
    }

    /// Quantity on hand; 0 for ingredients absent from the snapshot.
    pub fn quantity_of(&self, ingredient: &IngredientId) -> f64 {
        self.quantities.get(ingredient).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IngredientId, f64)> {
        self.quantities.iter().map(|(ingredient, qty)| (ingredient, *qty))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Scale each balance by the profile's cycling factor, flooring at zero.
    ///
    /// Factors are assigned over ingredients in name order. Presentation
    /// knob only; see `PlanningPolicy::inventory_stagger`.
    pub fn staggered(&self, profile: &StaggerProfile) -> Self {
        let quantities = self
            .quantities
            .iter()
            .enumerate()
            .map(|(index, (ingredient, qty))| {
                (ingredient.clone(), (qty * profile.factor(index)).max(0.0))
            })
            .collect();
        Self { quantities }
    }
}
