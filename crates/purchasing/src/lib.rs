//! Purchase history and what it implies: dated deliveries, latest-buy
//! terms, and each ingredient's unit of measure.
//!
//! Deterministic domain logic only (no IO, no HTTP, no storage).

pub mod latest;
pub mod ledger;
pub mod transaction;
pub mod units;

pub use latest::{LatestBuy, LatestBuys};
pub use ledger::DeliverySchedule;
pub use transaction::PurchaseTransaction;
pub use units::{ResolvedUnit, UnitResolver, UnitSource};
