use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use larder_core::IngredientId;

use crate::transaction::PurchaseTransaction;

/// Dated incoming-supply events derived from the whole purchase history.
///
/// Every transaction lands `lead_time_days` after it was placed; quantities
/// are summed per (delivery date, ingredient). Deliveries before horizon
/// start feed the inventory replay; deliveries inside the horizon surface in
/// the daily usage grid as known incoming supply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeliverySchedule {
    deliveries: BTreeMap<(NaiveDate, IngredientId), f64>,
}

impl DeliverySchedule {
    pub fn from_transactions(transactions: &[PurchaseTransaction], lead_time_days: i64) -> Self {
        let mut deliveries: BTreeMap<(NaiveDate, IngredientId), f64> = BTreeMap::new();
        for txn in transactions {
            let key = (txn.delivery_date(lead_time_days), txn.ingredient.clone());
            *deliveries.entry(key).or_insert(0.0) += txn.quantity;
        }
        debug!(
            deliveries = deliveries.len(),
            transactions = transactions.len(),
            "built delivery schedule"
        );
        Self { deliveries }
    }

    /// Quantity landing for an ingredient on a given date (0 when none).
    pub fn quantity_on(&self, date: NaiveDate, ingredient: &IngredientId) -> f64 {
        self.deliveries
            .get(&(date, ingredient.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Earliest delivery for an ingredient landing on or after `date`.
    pub fn next_on_or_after(
        &self,
        date: NaiveDate,
        ingredient: &IngredientId,
    ) -> Option<(NaiveDate, f64)> {
        self.deliveries
            .iter()
            .filter(|((delivery_date, ing), _)| *delivery_date >= date && ing == ingredient)
            .map(|((delivery_date, _), qty)| (*delivery_date, *qty))
            .next()
    }

    /// Distinct ingredients with at least one delivery.
    pub fn ingredients(&self) -> BTreeSet<IngredientId> {
        self.deliveries.keys().map(|(_, ing)| ing.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }
}
