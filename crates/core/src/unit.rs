//! Units of measure.
//!
//! Units travel as the short tokens the source tables use ("g", "ml", "kg",
//! "unit"). Which unit an ingredient resolves to is decided in the
//! purchasing crate (ledger unit first, name heuristic second); this type
//! only keeps the tokens from mixing with other strings.

use serde::{Deserialize, Serialize};

/// Unit-of-measure token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Mass unit assigned by the solid-ingredient heuristic.
    pub fn grams() -> Self {
        Self("g".to_string())
    }

    /// Volume unit assigned by the liquid-condiment heuristic.
    pub fn millilitres() -> Self {
        Self("ml".to_string())
    }

    /// Generic count unit; the final fallback.
    pub fn each() -> Self {
        Self("unit".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        Self(value)
    }
}
