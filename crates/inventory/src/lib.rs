//! On-hand inventory at horizon start, estimated from purchase and usage
//! history.

pub mod estimate;
pub mod snapshot;

pub use estimate::estimate_starting_inventory;
pub use snapshot::InventorySnapshot;
