use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use larder_core::{IngredientId, Unit};
use larder_recipes::RecipeBook;

use crate::record::SaleRecord;

/// Actual ingredient usage, aggregated by (date, ingredient, unit).
///
/// Built once from the sales history and read everywhere else: the forecast
/// seasonality baseline, the starting-inventory replay, and the daily usage
/// grid all consult this ledger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageLedger {
    entries: BTreeMap<(NaiveDate, IngredientId), BTreeMap<Unit, f64>>,
}

impl UsageLedger {
    /// Explode sales through the recipe book and aggregate.
    ///
    /// Each sale contributes `line.quantity * sale.quantity` per recipe line,
    /// keyed by sale date, ingredient, and the recipe line's unit. Sales for
    /// food items absent from the book are ignored and counted.
    pub fn from_sales(book: &RecipeBook, sales: &[SaleRecord]) -> Self {
        let mut entries: BTreeMap<(NaiveDate, IngredientId), BTreeMap<Unit, f64>> = BTreeMap::new();
        let mut unknown_food = 0usize;

        for sale in sales {
            let Some(lines) = book.get(&sale.food_item) else {
                unknown_food += 1;
                debug!(food = %sale.food_item, "ignoring sale for food item absent from recipe book");
                continue;
            };
            let date = sale.sale_date();
            for line in lines {
                *entries
                    .entry((date, line.ingredient.clone()))
                    .or_default()
                    .entry(line.unit.clone())
                    .or_insert(0.0) += line.quantity * sale.quantity;
            }
        }

        if unknown_food > 0 {
            warn!(skipped = unknown_food, "sales ignored for food items absent from recipe book");
        }

        Self { entries }
    }

    /// Entries whose date falls within `[start, end]` inclusive.
    pub fn restricted_to(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|((date, _), _)| *date >= start && *date <= end)
            .map(|(key, by_unit)| (key.clone(), by_unit.clone()))
            .collect();
        Self { entries }
    }

    /// Total usage for an ingredient on one date, summed across units.
    pub fn daily_total(&self, date: NaiveDate, ingredient: &IngredientId) -> f64 {
        self.entries
            .get(&(date, ingredient.clone()))
            .map(|by_unit| by_unit.values().sum())
            .unwrap_or(0.0)
    }

    /// Whether the ingredient has any usage on the given date.
    pub fn has_usage_on(&self, date: NaiveDate, ingredient: &IngredientId) -> bool {
        self.entries.contains_key(&(date, ingredient.clone()))
    }

    fn samples(&self, ingredient: &IngredientId) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|((_, ing), _)| ing == ingredient)
            .flat_map(|(_, by_unit)| by_unit.values().copied())
            .collect()
    }

    /// Mean of the aggregated per-(date, unit) usage values for an
    /// ingredient; `None` when the ledger holds no usage for it.
    pub fn mean_daily(&self, ingredient: &IngredientId) -> Option<f64> {
        let samples = self.samples(ingredient);
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    /// Median of the aggregated per-(date, unit) usage values for an
    /// ingredient; `None` when the ledger holds no usage for it.
    pub fn median_daily(&self, ingredient: &IngredientId) -> Option<f64> {
        let mut samples = self.samples(ingredient);
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f64::total_cmp);
        let mid = samples.len() / 2;
        if samples.len() % 2 == 1 {
            Some(samples[mid])
        } else {
            Some((samples[mid - 1] + samples[mid]) / 2.0)
        }
    }

    /// Distinct ingredients present in the ledger.
    pub fn ingredients(&self) -> BTreeSet<IngredientId> {
        self.entries.keys().map(|(_, ing)| ing.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of aggregated (date, ingredient, unit) entries.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }
}
