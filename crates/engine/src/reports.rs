//! Status tables derived from a planned horizon.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{Horizon, IngredientId, Supplier, Unit};
use larder_forecast::ForecastTable;
use larder_inventory::InventorySnapshot;
use larder_planner::{UsageGrid, first_stockout};
use larder_purchasing::{DeliverySchedule, LatestBuys, UnitResolver};

/// One ingredient's position as of the horizon start morning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStatusRow {
    pub ingredient: IngredientId,
    pub unit: Unit,
    pub current_qty: f64,
    pub last_supplier: Supplier,
    pub last_order_date: Option<NaiveDate>,
    pub last_order_qty: f64,
    pub next_delivery_date: Option<NaiveDate>,
    pub next_delivery_qty: f64,
    /// First day stock goes negative with ledger deliveries but no new
    /// order.
    pub stockout_date_if_no_order: Option<NaiveDate>,
}

/// One ingredient's forecast demand aggregated over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummaryRow {
    pub ingredient: IngredientId,
    pub unit: Unit,
    pub total: f64,
    pub average_daily: f64,
    pub peak_daily: f64,
}

/// One status row per ingredient, most urgent stockouts first.
///
/// Rows without a stockout sort after all rows with one; ties break on
/// ingredient name.
pub fn build_inventory_status(
    horizon: &Horizon,
    ingredients: &BTreeSet<IngredientId>,
    inventory: &InventorySnapshot,
    latest: &LatestBuys,
    schedule: &DeliverySchedule,
    units: &UnitResolver,
    grid: &UsageGrid,
) -> Vec<InventoryStatusRow> {
    let mut rows: Vec<InventoryStatusRow> = ingredients
        .iter()
        .map(|ingredient| {
            let (last_supplier, last_order_date, last_order_qty) = match latest.get(ingredient) {
                Some(buy) => (
                    buy.supplier.clone(),
                    Some(buy.last_order_date),
                    buy.last_order_qty,
                ),
                None => (Supplier::unknown(), None, 0.0),
            };
            let (next_delivery_date, next_delivery_qty) =
                match schedule.next_on_or_after(horizon.start(), ingredient) {
                    Some((date, qty)) => (Some(date), qty),
                    None => (None, 0.0),
                };
            let current_qty = inventory.quantity_of(ingredient);
            let stockout_date_if_no_order = grid
                .lane(ingredient)
                .and_then(|lane| first_stockout(lane, current_qty));
            InventoryStatusRow {
                ingredient: ingredient.clone(),
                unit: units.unit_of(ingredient),
                current_qty,
                last_supplier,
                last_order_date,
                last_order_qty,
                next_delivery_date,
                next_delivery_qty,
                stockout_date_if_no_order,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        match (a.stockout_date_if_no_order, b.stockout_date_if_no_order) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.ingredient.cmp(&b.ingredient))
    });
    rows
}

/// One summary row per ingredient, heaviest forecast demand first.
///
/// Horizon days with no forecast cell count as zero, so every ingredient in
/// the universe gets a row even when the forecast never mentions it.
pub fn build_forecast_summary(
    horizon: &Horizon,
    ingredients: &BTreeSet<IngredientId>,
    forecast: &ForecastTable,
    units: &UnitResolver,
) -> Vec<ForecastSummaryRow> {
    let mut rows: Vec<ForecastSummaryRow> = ingredients
        .iter()
        .map(|ingredient| {
            let values: Vec<f64> = horizon
                .dates()
                .map(|date| forecast.usage_on(date, ingredient).unwrap_or(0.0))
                .collect();
            let total: f64 = values.iter().sum();
            let peak_daily = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ForecastSummaryRow {
                ingredient: ingredient.clone(),
                unit: units.unit_of(ingredient),
                total,
                average_daily: total / f64::from(horizon.days()),
                peak_daily,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.ingredient.cmp(&b.ingredient))
    });
    rows
}
