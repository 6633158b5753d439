use chrono::Duration;
use serde::{Deserialize, Serialize};

use larder_core::{Horizon, IngredientId, Unit};
use larder_purchasing::LatestBuys;

/// One leg of the naive plan: repeat the ingredient's last order once,
/// placed at horizon start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineOrder {
    pub ingredient: IngredientId,
    pub quantity: f64,
    pub unit: Unit,
    pub cost: f64,
}

/// The recurring-order baseline: every ingredient with purchase history
/// whose repeat order, placed at horizon start, lands inside the horizon.
pub fn baseline_orders(
    horizon: &Horizon,
    latest: &LatestBuys,
    lead_time_days: i64,
) -> Vec<BaselineOrder> {
    let delivery_date = horizon.start() + Duration::days(lead_time_days);
    if !horizon.contains(delivery_date) {
        return Vec::new();
    }
    latest
        .iter()
        .map(|(ingredient, buy)| BaselineOrder {
            ingredient: ingredient.clone(),
            quantity: buy.last_order_qty,
            unit: buy.unit.clone(),
            cost: buy.last_order_qty * buy.unit_cost,
        })
        .collect()
}
