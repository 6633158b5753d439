//! Strongly-typed identifiers used across the planning domain.
//!
//! Ingredients, food items and suppliers are keyed by the names the source
//! tables use for them; the newtypes keep those name spaces from mixing.
//! Planning runs carry a time-ordered UUID for log/output correlation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an ingredient (name-keyed, as in the source tables).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

/// Identifier of a menu food item (name-keyed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodItemId(String);

/// Supplier name as recorded on purchase transactions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Supplier(String);

macro_rules! impl_name_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_name_newtype!(IngredientId);
impl_name_newtype!(FoodItemId);
impl_name_newtype!(Supplier);

impl Supplier {
    /// Fallback supplier for ingredients without purchase history.
    pub fn unknown() -> Self {
        Self("Unknown".to_string())
    }
}

/// Identifier of a single planning run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRunId(Uuid);

impl PlanRunId {
    /// Create a new run identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlanRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PlanRunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
