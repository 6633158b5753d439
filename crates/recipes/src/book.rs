//! The recipe book: food item → ordered ingredient lines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use larder_core::{FoodItemId, IngredientId, Unit};

use crate::spec::parse_quantity_spec;

/// One ingredient line of a recipe: quantity consumed per unit sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient: IngredientId,
    pub quantity: f64,
    pub unit: Unit,
}

/// Food item → ordered ingredient lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: BTreeMap<FoodItemId, Vec<RecipeLine>>,
}

impl RecipeBook {
    /// Build a book from raw `(food, [(ingredient, quantity-spec)])`
    /// entries.
    ///
    /// Lines whose quantity spec does not parse are dropped and counted;
    /// a duplicate ingredient within one recipe replaces the earlier line
    /// in place.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (FoodItemId, Vec<(IngredientId, String)>)>,
    {
        let mut recipes: BTreeMap<FoodItemId, Vec<RecipeLine>> = BTreeMap::new();
        let mut dropped = 0usize;

        for (food, lines) in entries {
            let recipe = recipes.entry(food.clone()).or_default();
            for (ingredient, spec) in lines {
                let Some(parsed) = parse_quantity_spec(&spec) else {
                    dropped += 1;
                    debug!(
                        food = %food,
                        ingredient = %ingredient,
                        spec = %spec,
                        "dropping recipe line with unparsable quantity spec"
                    );
                    continue;
                };
                let line = RecipeLine {
                    ingredient: ingredient.clone(),
                    quantity: parsed.amount,
                    unit: parsed.unit,
                };
                match recipe.iter_mut().find(|l| l.ingredient == ingredient) {
                    Some(existing) => *existing = line,
                    None => recipe.push(line),
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, "recipe lines dropped due to unparsable quantity specs");
        }

        Self { recipes }
    }

    /// Ingredient lines for a food item, in recipe order.
    pub fn get(&self, food: &FoodItemId) -> Option<&[RecipeLine]> {
        self.recipes.get(food).map(Vec::as_slice)
    }

    pub fn contains(&self, food: &FoodItemId) -> bool {
        self.recipes.contains_key(food)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes, in food-item name order.
    pub fn iter(&self) -> impl Iterator<Item = (&FoodItemId, &[RecipeLine])> {
        self.recipes.iter().map(|(food, lines)| (food, lines.as_slice()))
    }
}
