use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_core::{Horizon, IngredientId};
use larder_forecast::ForecastTable;
use larder_purchasing::DeliverySchedule;
use larder_sales::UsageLedger;

/// Which rung of the usage-resolution chain produced `daily_usage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageSource {
    /// Forecast cell for the day.
    Forecast,
    /// Recorded actual usage for the day.
    Actual,
    /// The ingredient's median daily usage from the reference window.
    Median,
    /// No signal at all; usage is zero.
    Zero,
}

/// One (date, ingredient) cell of the horizon grid.
///
/// `planned_delivery_qty` starts at zero and is written only by the reorder
/// planner, only on the owning ingredient's lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsageRecord {
    pub date: NaiveDate,
    pub ingredient: IngredientId,
    pub forecast_usage: Option<f64>,
    pub actual_usage: Option<f64>,
    pub daily_usage: f64,
    pub usage_source: UsageSource,
    pub delivery_qty: f64,
    pub planned_delivery_qty: f64,
}

/// Per-ingredient lanes of chronological daily records, exactly one record
/// per (horizon date, ingredient).
#[derive(Debug, Clone, PartialEq)]
pub struct UsageGrid {
    horizon: Horizon,
    lanes: BTreeMap<IngredientId, Vec<DailyUsageRecord>>,
}

impl UsageGrid {
    /// Merge the forecast, actual-usage, and delivery signals into lanes.
    ///
    /// `daily_usage` resolves forecast, else the day's actual usage, else
    /// the ingredient's median daily usage from `reference_usage`, else 0;
    /// the winning rung is tagged on the record.
    pub fn build(
        horizon: &Horizon,
        ingredients: &BTreeSet<IngredientId>,
        forecast: &ForecastTable,
        actual_usage: &UsageLedger,
        reference_usage: &UsageLedger,
        schedule: &DeliverySchedule,
    ) -> Self {
        let medians: BTreeMap<&IngredientId, f64> = ingredients
            .iter()
            .filter_map(|ing| reference_usage.median_daily(ing).map(|median| (ing, median)))
            .collect();

        let mut lanes: BTreeMap<IngredientId, Vec<DailyUsageRecord>> = BTreeMap::new();
        for ingredient in ingredients {
            let mut lane = Vec::with_capacity(horizon.days() as usize);
            for date in horizon.dates() {
                let forecast_usage = forecast.usage_on(date, ingredient);
                let actual = actual_usage
                    .has_usage_on(date, ingredient)
                    .then(|| actual_usage.daily_total(date, ingredient));
                let (daily_usage, usage_source) = match (forecast_usage, actual) {
                    (Some(usage), _) => (usage, UsageSource::Forecast),
                    (None, Some(usage)) => (usage, UsageSource::Actual),
                    (None, None) => match medians.get(ingredient) {
                        Some(median) => (*median, UsageSource::Median),
                        None => (0.0, UsageSource::Zero),
                    },
                };
                lane.push(DailyUsageRecord {
                    date,
                    ingredient: ingredient.clone(),
                    forecast_usage,
                    actual_usage: actual,
                    daily_usage,
                    usage_source,
                    delivery_qty: schedule.quantity_on(date, ingredient),
                    planned_delivery_qty: 0.0,
                });
            }
            lanes.insert(ingredient.clone(), lane);
        }

        debug!(
            ingredients = lanes.len(),
            days = horizon.days(),
            "built daily usage grid"
        );
        Self {
            horizon: *horizon,
            lanes,
        }
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    /// One ingredient's chronological records.
    pub fn lane(&self, ingredient: &IngredientId) -> Option<&[DailyUsageRecord]> {
        self.lanes.get(ingredient).map(Vec::as_slice)
    }

    /// All lanes in ingredient-name order.
    pub fn lanes(&self) -> impl Iterator<Item = (&IngredientId, &[DailyUsageRecord])> {
        self.lanes.iter().map(|(ing, lane)| (ing, lane.as_slice()))
    }

    /// All records, lane by lane.
    pub fn rows(&self) -> impl Iterator<Item = &DailyUsageRecord> {
        self.lanes.values().flatten()
    }

    pub fn ingredient_count(&self) -> usize {
        self.lanes.len()
    }

    /// Record a planned order landing on the ingredient's lane.
    pub(crate) fn add_planned_delivery(
        &mut self,
        ingredient: &IngredientId,
        date: NaiveDate,
        quantity: f64,
    ) {
        let Some(index) = self.horizon.day_index(date) else {
            return;
        };
        if let Some(record) = self
            .lanes
            .get_mut(ingredient)
            .and_then(|lane| lane.get_mut(index))
        {
            record.planned_delivery_qty += quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{FoodItemId, Supplier, Unit};
    use larder_forecast::ForecastRow;
    use larder_purchasing::PurchaseTransaction;
    use larder_recipes::RecipeBook;
    use larder_sales::SaleRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn universe(names: &[&str]) -> BTreeSet<IngredientId> {
        names.iter().map(|name| IngredientId::new(*name)).collect()
    }

    fn forecast_cell(ingredient: &str, usage: f64, on: NaiveDate) -> ForecastRow {
        ForecastRow {
            date: on,
            ingredient: IngredientId::new(ingredient),
            usage,
            unit: Unit::grams(),
        }
    }

    fn usage_for(book_line: (&str, &str), sales: &[(f64, NaiveDate)]) -> UsageLedger {
        let (food, spec) = book_line;
        let book = RecipeBook::from_entries(vec![(
            FoodItemId::new(food),
            vec![(IngredientId::new("Lettuce"), spec.to_string())],
        )]);
        let records: Vec<SaleRecord> = sales
            .iter()
            .map(|(qty, on)| SaleRecord::new(food, *qty, on.and_hms_opt(12, 0, 0).unwrap()))
            .collect();
        UsageLedger::from_sales(&book, &records)
    }

    #[test]
    fn one_chronological_record_per_date_and_ingredient() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        let grid = UsageGrid::build(
            &horizon,
            &universe(&["Bun", "Lettuce"]),
            &ForecastTable::default(),
            &UsageLedger::default(),
            &UsageLedger::default(),
            &DeliverySchedule::default(),
        );

        assert_eq!(grid.ingredient_count(), 2);
        assert_eq!(grid.rows().count(), 14);
        let lane = grid.lane(&IngredientId::new("Bun")).unwrap();
        assert_eq!(lane.len(), 7);
        assert!(lane.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn forecast_beats_actual_beats_median() {
        let horizon = Horizon::new(date(2020, 3, 17), 2);
        let forecast = ForecastTable::from_rows(vec![forecast_cell(
            "Lettuce",
            120.0,
            date(2020, 3, 17),
        )]);
        // Actual usage on both horizon days; reference window has samples
        // 30 and 50 (median 40).
        let actual = usage_for(
            ("Side Salad", "10g"),
            &[(2.0, date(2020, 3, 17)), (7.0, date(2020, 3, 18))],
        );
        let reference = usage_for(
            ("Side Salad", "10g"),
            &[(3.0, date(2020, 3, 10)), (5.0, date(2020, 3, 11))],
        );

        let grid = UsageGrid::build(
            &horizon,
            &universe(&["Lettuce"]),
            &forecast,
            &actual,
            &reference,
            &DeliverySchedule::default(),
        );

        let lane = grid.lane(&IngredientId::new("Lettuce")).unwrap();
        assert_eq!(lane[0].daily_usage, 120.0);
        assert_eq!(lane[0].usage_source, UsageSource::Forecast);
        assert_eq!(lane[0].actual_usage, Some(20.0));
        assert_eq!(lane[1].daily_usage, 70.0);
        assert_eq!(lane[1].usage_source, UsageSource::Actual);
    }

    #[test]
    fn median_fills_days_with_no_signal_and_zero_is_the_last_resort() {
        let horizon = Horizon::new(date(2020, 3, 17), 1);
        let reference = usage_for(
            ("Side Salad", "10g"),
            &[(3.0, date(2020, 3, 10)), (5.0, date(2020, 3, 11))],
        );

        let grid = UsageGrid::build(
            &horizon,
            &universe(&["Lettuce", "Bun"]),
            &ForecastTable::default(),
            &UsageLedger::default(),
            &reference,
            &DeliverySchedule::default(),
        );

        let lettuce = grid.lane(&IngredientId::new("Lettuce")).unwrap();
        assert_eq!(lettuce[0].daily_usage, 40.0);
        assert_eq!(lettuce[0].usage_source, UsageSource::Median);

        let bun = grid.lane(&IngredientId::new("Bun")).unwrap();
        assert_eq!(bun[0].daily_usage, 0.0);
        assert_eq!(bun[0].usage_source, UsageSource::Zero);
    }

    #[test]
    fn ledger_deliveries_attach_to_their_day() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        let txns = vec![PurchaseTransaction {
            ingredient: IngredientId::new("Bun"),
            quantity: 400.0,
            unit: Unit::each(),
            unit_cost: 0.1,
            supplier: Supplier::new("BakeCo"),
            transaction_date: date(2020, 3, 16), // lands 3-19
        }];
        let schedule = DeliverySchedule::from_transactions(&txns, 3);

        let grid = UsageGrid::build(
            &horizon,
            &universe(&["Bun"]),
            &ForecastTable::default(),
            &UsageLedger::default(),
            &UsageLedger::default(),
            &schedule,
        );

        let lane = grid.lane(&IngredientId::new("Bun")).unwrap();
        assert_eq!(lane[2].delivery_qty, 400.0);
        assert!(lane.iter().all(|r| r.planned_delivery_qty == 0.0));
    }

    #[test]
    fn planned_deliveries_land_only_on_the_target_lane_and_day() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        let mut grid = UsageGrid::build(
            &horizon,
            &universe(&["Bun", "Lettuce"]),
            &ForecastTable::default(),
            &UsageLedger::default(),
            &UsageLedger::default(),
            &DeliverySchedule::default(),
        );

        grid.add_planned_delivery(&IngredientId::new("Bun"), date(2020, 3, 19), 230.0);

        let bun = grid.lane(&IngredientId::new("Bun")).unwrap();
        assert_eq!(bun[2].planned_delivery_qty, 230.0);
        assert_eq!(bun[1].planned_delivery_qty, 0.0);
        let lettuce = grid.lane(&IngredientId::new("Lettuce")).unwrap();
        assert!(lettuce.iter().all(|r| r.planned_delivery_qty == 0.0));
    }
}
