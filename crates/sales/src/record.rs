use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use larder_core::FoodItemId;

/// One point-of-sale line: a food item sold at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub food_item: FoodItemId,
    pub quantity: f64,
    pub sold_at: NaiveDateTime,
}

impl SaleRecord {
    pub fn new(food_item: impl Into<FoodItemId>, quantity: f64, sold_at: NaiveDateTime) -> Self {
        Self {
            food_item: food_item.into(),
            quantity,
            sold_at,
        }
    }

    /// Calendar date of the sale; usage is aggregated per day.
    pub fn sale_date(&self) -> NaiveDate {
        self.sold_at.date()
    }
}
