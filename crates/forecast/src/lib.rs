//! Horizon demand forecasting.
//!
//! Two mutually exclusive paths: a seasonality forecast derived from recent
//! actual usage, or a positional remap of an externally supplied historical
//! forecast table when no recent usage exists.

pub mod builder;
pub mod table;

pub use builder::{HistoricalForecastRow, build_forecast};
pub use table::{ForecastRow, ForecastTable};
