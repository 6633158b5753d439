use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_core::{Horizon, IngredientId, PlanningPolicy};
use larder_purchasing::UnitResolver;
use larder_sales::UsageLedger;

use crate::table::{ForecastRow, ForecastTable};

/// One row of the externally supplied historical forecast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalForecastRow {
    pub date: NaiveDate,
    pub ingredient: IngredientId,
    pub predicted_quantity: f64,
}

/// Build the horizon forecast.
///
/// With any recent actual usage, each ingredient's mean daily usage is
/// scaled by the policy's seasonality factor for the horizon day. With no
/// recent usage at all, the first `horizon.days()` distinct dates of the
/// historical table are remapped in order onto the horizon's calendar and
/// the predicted quantities are used verbatim.
pub fn build_forecast(
    horizon: &Horizon,
    policy: &PlanningPolicy,
    recent_usage: &UsageLedger,
    historical: &[HistoricalForecastRow],
    units: &UnitResolver,
) -> ForecastTable {
    let rows = if recent_usage.is_empty() {
        fallback_rows(horizon, historical, units)
    } else {
        seasonality_rows(horizon, policy, recent_usage, units)
    };
    debug!(
        rows = rows.len(),
        from_recent_usage = !recent_usage.is_empty(),
        "built horizon forecast"
    );
    ForecastTable::from_rows(rows)
}

fn seasonality_rows(
    horizon: &Horizon,
    policy: &PlanningPolicy,
    recent_usage: &UsageLedger,
    units: &UnitResolver,
) -> Vec<ForecastRow> {
    let averages: Vec<(IngredientId, f64)> = recent_usage
        .ingredients()
        .into_iter()
        .filter_map(|ingredient| {
            recent_usage
                .mean_daily(&ingredient)
                .map(|mean| (ingredient, mean))
        })
        .collect();

    let mut rows = Vec::with_capacity(horizon.days() as usize * averages.len());
    for (day, date) in horizon.dates().enumerate() {
        let factor = policy.seasonality_for_day(day);
        for (ingredient, mean) in &averages {
            rows.push(ForecastRow {
                date,
                ingredient: ingredient.clone(),
                usage: mean * factor,
                unit: units.unit_of(ingredient),
            });
        }
    }
    rows
}

fn fallback_rows(
    horizon: &Horizon,
    historical: &[HistoricalForecastRow],
    units: &UnitResolver,
) -> Vec<ForecastRow> {
    let mut distinct_dates: Vec<NaiveDate> = historical.iter().map(|row| row.date).collect();
    distinct_dates.sort();
    distinct_dates.dedup();

    // First `days` distinct dates, remapped positionally onto the horizon.
    let date_mapping: BTreeMap<NaiveDate, NaiveDate> = distinct_dates
        .into_iter()
        .take(horizon.days() as usize)
        .zip(horizon.dates())
        .collect();

    historical
        .iter()
        .filter_map(|row| {
            date_mapping.get(&row.date).map(|mapped| ForecastRow {
                date: *mapped,
                ingredient: row.ingredient.clone(),
                usage: row.predicted_quantity,
                unit: units.unit_of(&row.ingredient),
            })
        })
        .collect()
}
