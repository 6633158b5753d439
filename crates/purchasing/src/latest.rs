use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, Supplier, Unit};

use crate::transaction::PurchaseTransaction;

/// Terms of an ingredient's most recent purchase: the supplier, unit and
/// unit cost quoted on recommendations, and the order the baseline repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestBuy {
    pub unit: Unit,
    pub unit_cost: f64,
    pub supplier: Supplier,
    pub last_order_date: NaiveDate,
    pub last_order_qty: f64,
}

/// Most recent transaction per ingredient.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LatestBuys {
    by_ingredient: BTreeMap<IngredientId, LatestBuy>,
}

impl LatestBuys {
    /// Keep, per ingredient, the transaction with the latest date; among
    /// equal dates the one later in input order wins.
    pub fn from_transactions(transactions: &[PurchaseTransaction]) -> Self {
        let mut by_ingredient: BTreeMap<IngredientId, LatestBuy> = BTreeMap::new();
        for txn in transactions {
            let candidate = LatestBuy {
                unit: txn.unit.clone(),
                unit_cost: txn.unit_cost,
                supplier: txn.supplier.clone(),
                last_order_date: txn.transaction_date,
                last_order_qty: txn.quantity,
            };
            match by_ingredient.get_mut(&txn.ingredient) {
                Some(existing) if existing.last_order_date > txn.transaction_date => {}
                Some(existing) => *existing = candidate,
                None => {
                    by_ingredient.insert(txn.ingredient.clone(), candidate);
                }
            }
        }
        Self { by_ingredient }
    }

    pub fn get(&self, ingredient: &IngredientId) -> Option<&LatestBuy> {
        self.by_ingredient.get(ingredient)
    }

    pub fn contains(&self, ingredient: &IngredientId) -> bool {
        self.by_ingredient.contains_key(ingredient)
    }

    /// Distinct ingredients with purchase history.
    pub fn ingredients(&self) -> BTreeSet<IngredientId> {
        self.by_ingredient.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IngredientId, &LatestBuy)> {
        self.by_ingredient.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ingredient.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_ingredient.len()
    }
}
