use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, Unit};

/// One forecast cell: expected usage of an ingredient on a horizon date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub ingredient: IngredientId,
    pub usage: f64,
    pub unit: Unit,
}

/// Forecast rows plus a (date, ingredient) lookup index.
///
/// A duplicate (date, ingredient) pair in the source rows keeps the later
/// row's value in the index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
    index: BTreeMap<(NaiveDate, IngredientId), f64>,
}

impl ForecastTable {
    pub fn from_rows(rows: Vec<ForecastRow>) -> Self {
        let index = rows
            .iter()
            .map(|row| ((row.date, row.ingredient.clone()), row.usage))
            .collect();
        Self { rows, index }
    }

    /// Forecast usage for (date, ingredient), if a cell exists.
    pub fn usage_on(&self, date: NaiveDate, ingredient: &IngredientId) -> Option<f64> {
        self.index.get(&(date, ingredient.clone())).copied()
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Distinct ingredients with at least one forecast cell.
    pub fn ingredients(&self) -> BTreeSet<IngredientId> {
        self.rows.iter().map(|row| row.ingredient.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(ingredient: &str, usage: f64, on: NaiveDate) -> ForecastRow {
        ForecastRow {
            date: on,
            ingredient: IngredientId::new(ingredient),
            usage,
            unit: Unit::grams(),
        }
    }

    #[test]
    fn indexes_rows_by_date_and_ingredient() {
        let table = ForecastTable::from_rows(vec![
            row("Lettuce", 120.0, date(2020, 3, 17)),
            row("Lettuce", 90.0, date(2020, 3, 18)),
        ]);
        let lettuce = IngredientId::new("Lettuce");
        assert_eq!(table.usage_on(date(2020, 3, 17), &lettuce), Some(120.0));
        assert_eq!(table.usage_on(date(2020, 3, 19), &lettuce), None);
    }

    #[test]
    fn duplicate_cells_keep_the_later_value() {
        let table = ForecastTable::from_rows(vec![
            row("Onion", 10.0, date(2020, 3, 17)),
            row("Onion", 25.0, date(2020, 3, 17)),
        ]);
        assert_eq!(
            table.usage_on(date(2020, 3, 17), &IngredientId::new("Onion")),
            Some(25.0)
        );
        assert_eq!(table.len(), 2);
    }
}
