//! `larder` — command-line replenishment planner over CSV/JSON tables.

pub mod load;
pub mod render;
