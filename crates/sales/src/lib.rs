//! Point-of-sale records and their translation into ingredient usage.
//!
//! Deterministic domain logic only: sales are exploded through the recipe
//! book into per-date, per-ingredient actual usage, with no IO.

pub mod record;
pub mod usage;

pub use record::SaleRecord;
pub use usage::UsageLedger;
