use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, Supplier, Unit};

/// One historical purchase order line from the bank/ledger files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    pub ingredient: IngredientId,
    pub quantity: f64,
    pub unit: Unit,
    pub unit_cost: f64,
    pub supplier: Supplier,
    pub transaction_date: NaiveDate,
}

impl PurchaseTransaction {
    /// The date the goods land: transaction date plus the supplier lead time.
    pub fn delivery_date(&self, lead_time_days: i64) -> NaiveDate {
        self.transaction_date + Duration::days(lead_time_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn delivery_date_adds_lead_time() {
        let txn = PurchaseTransaction {
            ingredient: IngredientId::new("Bun"),
            quantity: 500.0,
            unit: Unit::each(),
            unit_cost: 0.1,
            supplier: Supplier::new("BakeCo"),
            transaction_date: date(2020, 3, 14),
        };
        assert_eq!(txn.delivery_date(3), date(2020, 3, 17));
        assert_eq!(txn.delivery_date(0), date(2020, 3, 14));
    }
}
