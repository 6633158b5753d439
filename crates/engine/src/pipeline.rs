use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use larder_core::{Horizon, IngredientId, PlanRunId, PlanningPolicy, PlanningResult};
use larder_costing::{CostComparison, baseline_orders, compare_costs};
use larder_forecast::{HistoricalForecastRow, build_forecast};
use larder_inventory::estimate_starting_inventory;
use larder_planner::{ReorderRecommendation, UsageGrid, plan_reorders};
use larder_purchasing::{DeliverySchedule, LatestBuys, PurchaseTransaction, UnitResolver};
use larder_recipes::RecipeBook;
use larder_sales::{SaleRecord, UsageLedger};

use crate::reports::{
    ForecastSummaryRow, InventoryStatusRow, build_forecast_summary, build_inventory_status,
};

/// Immutable inputs of one planning run.
#[derive(Debug, Clone, Default)]
pub struct PlanningInputs {
    pub recipes: RecipeBook,
    pub transactions: Vec<PurchaseTransaction>,
    pub sales: Vec<SaleRecord>,
    pub historical_forecast: Vec<HistoricalForecastRow>,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PlanningRun {
    pub run_id: PlanRunId,
    pub horizon: Horizon,
    pub inventory_status: Vec<InventoryStatusRow>,
    pub forecast_summary: Vec<ForecastSummaryRow>,
    pub recommendations: Vec<ReorderRecommendation>,
    pub costs: CostComparison,
    pub grid: UsageGrid,
}

/// The fixed-horizon replenishment pipeline.
///
/// Stages run in dependency order over preloaded tables; nothing is
/// persisted and a run either completes or fails fast on an invalid
/// policy. Missing or partial source data degrades specific fields,
/// never the run.
#[derive(Debug, Clone)]
pub struct PlanningPipeline {
    policy: PlanningPolicy,
}

impl PlanningPipeline {
    pub fn new(policy: PlanningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    /// Plan the horizon starting at `start_date`.
    pub fn run(&self, start_date: NaiveDate, inputs: &PlanningInputs) -> PlanningResult<PlanningRun> {
        self.policy.validate()?;

        let run_id = PlanRunId::new();
        let horizon = Horizon::new(start_date, self.policy.recurrence_days);
        info!(
            run_id = %run_id,
            start = %horizon.start(),
            days = horizon.days(),
            lead_time_days = self.policy.lead_time_days,
            "starting planning run"
        );

        // Sales become per-date ingredient usage; the trailing window is
        // the reference period for averages, medians, and the inventory
        // replay.
        let usage = UsageLedger::from_sales(&inputs.recipes, &inputs.sales);
        let window = horizon.trailing_window();
        let recent_usage = usage.restricted_to(window.start(), window.end());
        debug!(
            entries = usage.entry_count(),
            recent_entries = recent_usage.entry_count(),
            window_start = %window.start(),
            "translated sales into ingredient usage"
        );

        let schedule =
            DeliverySchedule::from_transactions(&inputs.transactions, self.policy.lead_time_days);
        let latest = LatestBuys::from_transactions(&inputs.transactions);
        let units = UnitResolver::from_latest_buys(&latest);

        let forecast = build_forecast(
            &horizon,
            &self.policy,
            &recent_usage,
            &inputs.historical_forecast,
            &units,
        );

        // Every ingredient any source knows about gets a lane and a row in
        // the status tables.
        let mut ingredients: BTreeSet<IngredientId> = forecast.ingredients();
        ingredients.extend(usage.ingredients());
        ingredients.extend(inputs.transactions.iter().map(|txn| txn.ingredient.clone()));

        let mut inventory = estimate_starting_inventory(
            horizon.start(),
            &ingredients,
            &latest,
            &schedule,
            &recent_usage,
            self.policy.lead_time_days,
        );
        if let Some(profile) = &self.policy.inventory_stagger {
            inventory = inventory.staggered(profile);
        }

        let mut grid = UsageGrid::build(
            &horizon,
            &ingredients,
            &forecast,
            &usage,
            &recent_usage,
            &schedule,
        );

        let recommendations = plan_reorders(
            &mut grid,
            &inventory,
            &latest,
            &units,
            self.policy.lead_time_days,
        );
        info!(
            ingredients = ingredients.len(),
            recommendations = recommendations.len(),
            "planned reorders"
        );

        let baseline = baseline_orders(&horizon, &latest, self.policy.lead_time_days);
        let costs = compare_costs(&recommendations, &baseline);

        let inventory_status = build_inventory_status(
            &horizon,
            &ingredients,
            &inventory,
            &latest,
            &schedule,
            &units,
            &grid,
        );
        let forecast_summary = build_forecast_summary(&horizon, &ingredients, &forecast, &units);

        info!(
            run_id = %run_id,
            dynamic_total = costs.dynamic_total,
            baseline_total = costs.baseline_total,
            savings = costs.savings,
            "planning run complete"
        );

        Ok(PlanningRun {
            run_id,
            horizon,
            inventory_status,
            forecast_summary,
            recommendations,
            costs,
            grid,
        })
    }
}
