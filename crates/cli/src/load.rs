//! Input table loading.
//!
//! Three tabular sources (purchase ledger, POS sales, historical forecast)
//! plus the recipe mapping JSON. Files parse strictly: a malformed row fails
//! the load. Content-level gaps (unknown foods, unparsable quantity specs)
//! are not load errors; downstream stages degrade around them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use larder_core::{FoodItemId, IngredientId, Supplier, Unit};
use larder_forecast::HistoricalForecastRow;
use larder_purchasing::PurchaseTransaction;
use larder_recipes::RecipeBook;
use larder_sales::SaleRecord;

/// POS timestamps come in `2020-03-17 12:30:00` form.
const POS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Recipe mapping JSON: `{food: [[ingredient, "90g"], ...]}`.
pub fn load_recipes(path: &Path) -> Result<RecipeBook, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_recipes(&raw)
}

pub fn parse_recipes(raw: &str) -> Result<RecipeBook, LoadError> {
    let mapping: BTreeMap<String, Vec<(String, String)>> = serde_json::from_str(raw)?;
    let book = RecipeBook::from_entries(mapping.into_iter().map(|(food, lines)| {
        let lines = lines
            .into_iter()
            .map(|(ingredient, spec)| (IngredientId::new(ingredient), spec))
            .collect();
        (FoodItemId::new(food), lines)
    }));
    debug!(foods = book.len(), "loaded recipe book");
    Ok(book)
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    ingredient: String,
    unit: String,
    qty: f64,
    unit_cost_gbp: f64,
    merchant: String,
    txn_date: NaiveDate,
}

/// One purchase ledger CSV (`ingredient, unit, qty, unit_cost_gbp,
/// merchant, txn_date`). Statements from several files concatenate in
/// call order.
pub fn load_transactions(path: &Path) -> Result<Vec<PurchaseTransaction>, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_transactions(&raw)
}

pub fn parse_transactions(raw: &str) -> Result<Vec<PurchaseTransaction>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw.as_bytes());
    let mut transactions = Vec::new();
    for row in reader.deserialize() {
        let row: LedgerRow = row?;
        transactions.push(PurchaseTransaction {
            ingredient: IngredientId::new(row.ingredient),
            quantity: row.qty,
            unit: Unit::new(row.unit),
            unit_cost: row.unit_cost_gbp,
            supplier: Supplier::new(row.merchant),
            transaction_date: row.txn_date,
        });
    }
    Ok(transactions)
}

#[derive(Debug, Deserialize)]
struct PosRow {
    datetime: String,
    actual_food: String,
    quantity: f64,
}

/// POS sales CSV (`datetime, actual_food, quantity`).
pub fn load_sales(path: &Path) -> Result<Vec<SaleRecord>, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_sales(&raw)
}

pub fn parse_sales(raw: &str) -> Result<Vec<SaleRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw.as_bytes());
    let mut sales = Vec::new();
    for row in reader.deserialize() {
        let row: PosRow = row?;
        let sold_at = NaiveDateTime::parse_from_str(&row.datetime, POS_TIMESTAMP_FORMAT)?;
        sales.push(SaleRecord::new(row.actual_food, row.quantity, sold_at));
    }
    Ok(sales)
}

#[derive(Debug, Deserialize)]
struct ForecastCsvRow {
    date: NaiveDate,
    ingredient: String,
    pred_qty: f64,
}

/// Historical demand forecast CSV (`date, ingredient, pred_qty`); the
/// fallback source when there is no recent actual usage.
pub fn load_historical_forecast(path: &Path) -> Result<Vec<HistoricalForecastRow>, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_historical_forecast(&raw)
}

pub fn parse_historical_forecast(raw: &str) -> Result<Vec<HistoricalForecastRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw.as_bytes());
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: ForecastCsvRow = row?;
        rows.push(HistoricalForecastRow {
            date: row.date,
            ingredient: IngredientId::new(row.ingredient),
            predicted_quantity: row.pred_qty,
        });
    }
    Ok(rows)
}
