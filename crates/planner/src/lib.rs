//! The daily usage grid and the per-ingredient reorder simulation.
//!
//! Each ingredient is planned over its own lane of chronological grid rows
//! with no shared mutable state, so lanes simulate in parallel and merge
//! into one deterministic recommendation list.

pub mod grid;
pub mod sim;

pub use grid::{DailyUsageRecord, UsageGrid, UsageSource};
pub use sim::{ReorderRecommendation, first_stockout, plan_reorders};
