use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use tracing::debug;

use larder_core::IngredientId;
use larder_purchasing::{DeliverySchedule, LatestBuys};
use larder_sales::UsageLedger;

use crate::snapshot::InventorySnapshot;

/// Estimate each ingredient's on-hand quantity at `horizon_start` morning.
///
/// Per ingredient: no purchase history means 0; a last delivery landing on
/// or after horizon start means 0 (the stock has not arrived; the grid sees
/// it as an in-horizon delivery instead). Otherwise the balance starts at
/// the last transaction's quantity and replays every day from that delivery
/// date up to the day before horizon start, adding the day's ledger
/// deliveries and subtracting the day's recorded actual usage. Balances can
/// end negative when recorded usage outran recorded supply.
pub fn estimate_starting_inventory(
    horizon_start: NaiveDate,
    ingredients: &BTreeSet<IngredientId>,
    latest: &LatestBuys,
    schedule: &DeliverySchedule,
    usage: &UsageLedger,
    lead_time_days: i64,
) -> InventorySnapshot {
    let mut quantities: BTreeMap<IngredientId, f64> = BTreeMap::new();

    for ingredient in ingredients {
        let Some(buy) = latest.get(ingredient) else {
            quantities.insert(ingredient.clone(), 0.0);
            continue;
        };

        let last_delivery = buy.last_order_date + Duration::days(lead_time_days);
        if last_delivery >= horizon_start {
            quantities.insert(ingredient.clone(), 0.0);
            continue;
        }

        let mut balance = buy.last_order_qty;
        let mut day = last_delivery;
        while day < horizon_start {
            balance += schedule.quantity_on(day, ingredient);
            balance -= usage.daily_total(day, ingredient);
            day += Duration::days(1);
        }
        quantities.insert(ingredient.clone(), balance);
    }

    debug!(ingredients = quantities.len(), "estimated starting inventory");
    InventorySnapshot::from_quantities(quantities)
}
