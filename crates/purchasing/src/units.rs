use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, Unit};

use crate::latest::LatestBuys;

/// Ingredient names treated as solid food when purchase history says nothing.
const MASS_NAME_PATTERNS: [&str; 2] = ["Patty", "Filling"];
const MASS_INGREDIENTS: [&str; 6] = [
    "Lettuce",
    "Pickles",
    "Onion",
    "Potatoes",
    "Chicken Nugget",
    "Fish Fillet",
];
const VOLUME_INGREDIENTS: [&str; 4] = ["Milk", "Ketchup", "Mustard", "Mayonnaise"];

/// Which rung of the resolution chain produced a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSource {
    /// Unit recorded on the ingredient's most recent transaction.
    Ledger,
    /// Name-based solid/liquid classification.
    Heuristic,
    /// Generic count unit.
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    pub unit: Unit,
    pub source: UnitSource,
}

/// Ordered unit resolution: ledger unit, else name heuristic, else count.
///
/// The heuristic never overrides purchase history; it only applies to
/// ingredients that never appear in a transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitResolver {
    ledger_units: BTreeMap<IngredientId, Unit>,
}

impl UnitResolver {
    pub fn from_latest_buys(latest: &LatestBuys) -> Self {
        let ledger_units = latest
            .iter()
            .map(|(ingredient, buy)| (ingredient.clone(), buy.unit.clone()))
            .collect();
        Self { ledger_units }
    }

    pub fn resolve(&self, ingredient: &IngredientId) -> ResolvedUnit {
        if let Some(unit) = self.ledger_units.get(ingredient) {
            return ResolvedUnit {
                unit: unit.clone(),
                source: UnitSource::Ledger,
            };
        }
        let name = ingredient.as_str();
        if MASS_NAME_PATTERNS.iter().any(|pattern| name.contains(pattern))
            || MASS_INGREDIENTS.contains(&name)
        {
            return ResolvedUnit {
                unit: Unit::grams(),
                source: UnitSource::Heuristic,
            };
        }
        if VOLUME_INGREDIENTS.contains(&name) {
            return ResolvedUnit {
                unit: Unit::millilitres(),
                source: UnitSource::Heuristic,
            };
        }
        ResolvedUnit {
            unit: Unit::each(),
            source: UnitSource::Default,
        }
    }

    /// Resolved unit without the source tag.
    pub fn unit_of(&self, ingredient: &IngredientId) -> Unit {
        self.resolve(ingredient).unit
    }
}
