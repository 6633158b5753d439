//! Cost of the dynamic plan against the naive recurring baseline.

pub mod baseline;
pub mod compare;

pub use baseline::{BaselineOrder, baseline_orders};
pub use compare::{CostComparison, compare_costs};
