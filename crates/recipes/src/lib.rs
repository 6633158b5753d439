//! `larder-recipes` — the recipe catalog: food items and their ingredient
//! lines, parsed from compact quantity specs.

pub mod book;
pub mod spec;

pub use book::{RecipeBook, RecipeLine};
pub use spec::{ParsedQuantity, parse_quantity_spec};
