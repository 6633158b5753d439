use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_core::{IngredientId, Supplier, Unit};
use larder_inventory::InventorySnapshot;
use larder_purchasing::{LatestBuys, UnitResolver};

use crate::grid::{DailyUsageRecord, UsageGrid};

/// A single reorder for one ingredient within the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub ingredient: IngredientId,
    pub supplier: Supplier,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub order_qty: f64,
    pub unit: Unit,
    pub unit_cost: f64,
    pub estimated_cost: f64,
    /// First date the do-nothing replay went negative; kept for
    /// traceability.
    pub stockout_date_if_no_order: NaiveDate,
}

struct LaneOutcome {
    stockout_date: NaiveDate,
    order_date: NaiveDate,
    delivery_date: NaiveDate,
    order_qty: f64,
}

/// Plan at most one reorder per ingredient over its grid lane.
///
/// Lanes are simulated in parallel (each reads only its own rows and its
/// own starting balance); planned deliveries are then applied to the grid
/// and the merged list is sorted by order date ascending, ties by estimated
/// cost descending.
pub fn plan_reorders(
    grid: &mut UsageGrid,
    inventory: &InventorySnapshot,
    latest: &LatestBuys,
    units: &UnitResolver,
    lead_time_days: i64,
) -> Vec<ReorderRecommendation> {
    let outcomes: Vec<(IngredientId, LaneOutcome)> = {
        let lanes: Vec<(&IngredientId, &[DailyUsageRecord])> = grid.lanes().collect();
        lanes
            .par_iter()
            .filter_map(|&(ingredient, lane)| {
                simulate_lane(lane, inventory.quantity_of(ingredient), lead_time_days)
                    .map(|outcome| (ingredient.clone(), outcome))
            })
            .collect()
    };

    for (ingredient, outcome) in &outcomes {
        grid.add_planned_delivery(ingredient, outcome.delivery_date, outcome.order_qty);
    }

    let mut recommendations: Vec<ReorderRecommendation> = outcomes
        .into_iter()
        .map(|(ingredient, outcome)| {
            let unit = units.unit_of(&ingredient);
            let (supplier, unit_cost) = match latest.get(&ingredient) {
                Some(buy) => (buy.supplier.clone(), buy.unit_cost),
                None => (Supplier::unknown(), 0.0),
            };
            debug!(
                ingredient = %ingredient,
                stockout = %outcome.stockout_date,
                order_qty = outcome.order_qty,
                "scheduled reorder"
            );
            ReorderRecommendation {
                ingredient,
                supplier,
                order_date: outcome.order_date,
                delivery_date: outcome.delivery_date,
                order_qty: outcome.order_qty,
                unit,
                unit_cost,
                estimated_cost: outcome.order_qty * unit_cost,
                stockout_date_if_no_order: outcome.stockout_date,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        a.order_date
            .cmp(&b.order_date)
            .then_with(|| b.estimated_cost.total_cmp(&a.estimated_cost))
    });
    recommendations
}

/// First date the do-nothing replay dips below zero, if it ever does.
///
/// Replays `balance += delivery_qty - daily_usage` over the lane, ignoring
/// planned deliveries.
pub fn first_stockout(lane: &[DailyUsageRecord], starting_inventory: f64) -> Option<NaiveDate> {
    let mut balance = starting_inventory;
    for record in lane {
        balance += record.delivery_qty - record.daily_usage;
        if balance < 0.0 {
            return Some(record.date);
        }
    }
    None
}

/// Simulate one ingredient's horizon; `None` when stock never runs out.
fn simulate_lane(
    lane: &[DailyUsageRecord],
    starting_inventory: f64,
    lead_time_days: i64,
) -> Option<LaneOutcome> {
    let stockout_date = first_stockout(lane, starting_inventory)?;

    // Latest safe order still lands on the stockout date.
    let order_date = stockout_date - Duration::days(lead_time_days);
    let delivery_date = order_date + Duration::days(lead_time_days);

    // Pass 2: balance on the delivery morning, before the order lands.
    let mut at_delivery_morning = starting_inventory;
    for record in lane {
        if record.date >= delivery_date {
            break;
        }
        at_delivery_morning += record.delivery_qty - record.daily_usage;
    }

    let remaining_need: f64 = lane
        .iter()
        .filter(|record| record.date >= delivery_date)
        .map(|record| record.daily_usage)
        .sum();
    let order_qty = (remaining_need - at_delivery_morning.max(0.0)).max(0.0);

    Some(LaneOutcome {
        stockout_date,
        order_date,
        delivery_date,
        order_qty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use larder_core::Horizon;
    use larder_forecast::{ForecastRow, ForecastTable};
    use larder_purchasing::{DeliverySchedule, PurchaseTransaction};
    use larder_sales::UsageLedger;
    use proptest::prelude::*;

    use crate::grid::UsageSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lane_record(ingredient: &str, on: NaiveDate, usage: f64, delivery: f64) -> DailyUsageRecord {
        DailyUsageRecord {
            date: on,
            ingredient: IngredientId::new(ingredient),
            forecast_usage: Some(usage),
            actual_usage: None,
            daily_usage: usage,
            usage_source: UsageSource::Forecast,
            delivery_qty: delivery,
            planned_delivery_qty: 0.0,
        }
    }

    fn flat_lane(ingredient: &str, start: NaiveDate, usage: f64, days: u32) -> Vec<DailyUsageRecord> {
        Horizon::new(start, days)
            .dates()
            .map(|on| lane_record(ingredient, on, usage, 0.0))
            .collect()
    }

    #[test]
    fn stockout_on_day_three_orders_one_day_before_the_horizon() {
        // 120 on hand, 50/day for 7 days, lead time 3: the balance first
        // goes negative on day 3, so the order goes out the day before the
        // horizon starts and lands exactly on the stockout date.
        let lane = flat_lane("Bun", date(2020, 3, 17), 50.0, 7);
        let outcome = simulate_lane(&lane, 120.0, 3).unwrap();

        assert_eq!(outcome.stockout_date, date(2020, 3, 19));
        assert_eq!(outcome.order_date, date(2020, 3, 16));
        assert_eq!(outcome.delivery_date, date(2020, 3, 19));
        // 20 left on the delivery morning; 5 days of need remain.
        assert_eq!(outcome.order_qty, 230.0);
    }

    #[test]
    fn fully_covered_lane_produces_no_outcome() {
        let lane = flat_lane("Bun", date(2020, 3, 17), 50.0, 7);
        assert!(simulate_lane(&lane, 350.0, 3).is_none());
    }

    #[test]
    fn ledger_delivery_mid_horizon_can_cover_the_week() {
        let mut lane = flat_lane("Bun", date(2020, 3, 17), 50.0, 7);
        lane[2].delivery_qty = 300.0;
        assert!(simulate_lane(&lane, 100.0, 3).is_none());
    }

    #[test]
    fn pre_existing_deficit_orders_the_full_remaining_need() {
        // Day one already ends negative, so the order lands on day one and
        // the deficit balance does not offset the need.
        let lane = flat_lane("Bun", date(2020, 3, 17), 50.0, 7);
        let outcome = simulate_lane(&lane, 10.0, 3).unwrap();

        assert_eq!(outcome.stockout_date, date(2020, 3, 17));
        assert_eq!(outcome.delivery_date, date(2020, 3, 17));
        // Balance at delivery morning is +10 (no rows precede day one).
        assert_eq!(outcome.order_qty, 340.0);
    }

    #[test]
    fn zero_lead_time_orders_on_the_stockout_date() {
        let lane = flat_lane("Bun", date(2020, 3, 17), 50.0, 7);
        let outcome = simulate_lane(&lane, 120.0, 0).unwrap();
        assert_eq!(outcome.order_date, outcome.stockout_date);
        assert_eq!(outcome.delivery_date, outcome.stockout_date);
    }

    fn grid_for(
        usages: &[(&str, f64)],
        horizon: &Horizon,
        txns: &[PurchaseTransaction],
    ) -> UsageGrid {
        let rows = usages
            .iter()
            .flat_map(|(ingredient, usage)| {
                horizon.dates().map(|on| ForecastRow {
                    date: on,
                    ingredient: IngredientId::new(*ingredient),
                    usage: *usage,
                    unit: Unit::each(),
                })
            })
            .collect();
        let ingredients: BTreeSet<IngredientId> = usages
            .iter()
            .map(|(ingredient, _)| IngredientId::new(*ingredient))
            .collect();
        UsageGrid::build(
            horizon,
            &ingredients,
            &ForecastTable::from_rows(rows),
            &UsageLedger::default(),
            &UsageLedger::default(),
            &DeliverySchedule::from_transactions(txns, 3),
        )
    }

    fn snapshot(quantities: &[(&str, f64)]) -> InventorySnapshot {
        InventorySnapshot::from_quantities(
            quantities
                .iter()
                .map(|(name, qty)| (IngredientId::new(*name), *qty))
                .collect(),
        )
    }

    #[test]
    fn plans_at_most_one_order_per_ingredient_and_applies_it_to_the_grid() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        let mut grid = grid_for(&[("Bun", 50.0), ("Milk", 10.0)], &horizon, &[]);
        let inventory = snapshot(&[("Bun", 120.0), ("Milk", 500.0)]);

        let recommendations = plan_reorders(
            &mut grid,
            &inventory,
            &LatestBuys::from_transactions(&[]),
            &UnitResolver::default(),
            3,
        );

        // Milk never stocks out; Bun gets exactly one order.
        assert_eq!(recommendations.len(), 1);
        let rec = &recommendations[0];
        assert_eq!(rec.ingredient, IngredientId::new("Bun"));
        assert_eq!(rec.order_qty, 230.0);
        assert_eq!(rec.supplier, Supplier::unknown());
        assert_eq!(rec.unit_cost, 0.0);
        assert_eq!(rec.estimated_cost, 0.0);

        let lane = grid.lane(&IngredientId::new("Bun")).unwrap();
        assert_eq!(lane[2].planned_delivery_qty, 230.0);
        let milk = grid.lane(&IngredientId::new("Milk")).unwrap();
        assert!(milk.iter().all(|r| r.planned_delivery_qty == 0.0));
    }

    #[test]
    fn recommendation_terms_come_from_the_latest_buy() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        let txns = vec![PurchaseTransaction {
            ingredient: IngredientId::new("Bun"),
            quantity: 400.0,
            unit: Unit::each(),
            unit_cost: 0.5,
            supplier: Supplier::new("BakeCo"),
            transaction_date: date(2020, 3, 2),
        }];
        let mut grid = grid_for(&[("Bun", 50.0)], &horizon, &[]);

        let recommendations = plan_reorders(
            &mut grid,
            &snapshot(&[("Bun", 120.0)]),
            &LatestBuys::from_transactions(&txns),
            &UnitResolver::from_latest_buys(&LatestBuys::from_transactions(&txns)),
            3,
        );

        let rec = &recommendations[0];
        assert_eq!(rec.supplier, Supplier::new("BakeCo"));
        assert_eq!(rec.unit, Unit::each());
        assert_eq!(rec.unit_cost, 0.5);
        assert_eq!(rec.estimated_cost, 115.0);
    }

    #[test]
    fn merged_list_sorts_by_order_date_then_cost_descending() {
        let horizon = Horizon::new(date(2020, 3, 17), 7);
        // All three stock out on day one (order date three days earlier);
        // Cheap and Dear tie on date and order by cost.
        let txns = vec![
            PurchaseTransaction {
                ingredient: IngredientId::new("Cheap"),
                quantity: 100.0,
                unit: Unit::each(),
                unit_cost: 0.1,
                supplier: Supplier::new("A"),
                transaction_date: date(2020, 3, 1),
            },
            PurchaseTransaction {
                ingredient: IngredientId::new("Dear"),
                quantity: 100.0,
                unit: Unit::each(),
                unit_cost: 9.0,
                supplier: Supplier::new("B"),
                transaction_date: date(2020, 3, 1),
            },
            PurchaseTransaction {
                ingredient: IngredientId::new("Later"),
                quantity: 100.0,
                unit: Unit::each(),
                unit_cost: 99.0,
                supplier: Supplier::new("C"),
                transaction_date: date(2020, 3, 1),
            },
        ];
        let latest = LatestBuys::from_transactions(&txns);
        let mut grid = grid_for(
            &[("Cheap", 40.0), ("Dear", 40.0), ("Later", 10.0)],
            &horizon,
            &[],
        );
        let inventory = snapshot(&[("Cheap", 10.0), ("Dear", 10.0), ("Later", 25.0)]);

        let recommendations = plan_reorders(
            &mut grid,
            &inventory,
            &latest,
            &UnitResolver::from_latest_buys(&latest),
            3,
        );

        let order: Vec<&str> = recommendations
            .iter()
            .map(|rec| rec.ingredient.as_str())
            .collect();
        assert_eq!(order, vec!["Dear", "Cheap", "Later"]);
        assert!(recommendations[0].order_date <= recommendations[2].order_date);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every simulated order lands exactly one lead time
        /// after it is placed, on the stockout date, with a non-negative
        /// quantity; lanes that never go negative produce nothing.
        #[test]
        fn simulated_orders_land_on_the_stockout_date(
            start in 0.0..400.0f64,
            usages in prop::collection::vec(0.0..120.0f64, 7),
            deliveries in prop::collection::vec(0.0..80.0f64, 7),
        ) {
            let lane: Vec<DailyUsageRecord> = Horizon::new(date(2020, 3, 17), 7)
                .dates()
                .zip(usages.iter().zip(deliveries.iter()))
                .map(|(on, (usage, delivery))| lane_record("Bun", on, *usage, *delivery))
                .collect();

            match simulate_lane(&lane, start, 3) {
                Some(outcome) => {
                    prop_assert_eq!(
                        outcome.delivery_date,
                        outcome.order_date + Duration::days(3)
                    );
                    prop_assert_eq!(outcome.delivery_date, outcome.stockout_date);
                    prop_assert!(outcome.order_qty >= 0.0);
                }
                None => {
                    let mut balance = start;
                    for record in &lane {
                        balance += record.delivery_qty - record.daily_usage;
                        prop_assert!(balance >= 0.0);
                    }
                }
            }
        }
    }
}
