//! The planning pipeline: composes the domain crates into one
//! deterministic batch run over immutable inputs.

pub mod pipeline;
pub mod reports;


pub use pipeline::{PlanningInputs, PlanningPipeline, PlanningRun};
pub use reports::{ForecastSummaryRow, InventoryStatusRow};
