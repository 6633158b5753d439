//! `larder-core` — planning foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO concerns): the
//! tunable policy of a run, the horizon calendar, typed identifiers, units
//! of measure, and the error model shared by the pipeline crates.

pub mod error;
pub mod horizon;
pub mod id;
pub mod policy;
pub mod unit;

pub use error::{PlanningError, PlanningResult};
pub use horizon::Horizon;
pub use id::{FoodItemId, IngredientId, PlanRunId, Supplier};
pub use policy::{PlanningPolicy, StaggerProfile};
pub use unit::Unit;
