//! Quantity-spec parsing.
//!
//! Recipe quantities arrive as compact strings ("90g", "1.5 kg",
//! "2 slices"): a number followed by a unit token. Anything else is a
//! data-quality problem; the book builder drops such lines and keeps going.

use std::sync::LazyLock;

use regex::Regex;

use larder_core::Unit;

/// Matches a numeric amount followed by a unit token at the start of the
/// trimmed spec. Trailing text is ignored.
static QUANTITY_SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)\s*(\w+)").expect("invalid quantity-spec regex"));

/// A parsed quantity spec: amount consumed per unit sold, plus the unit the
/// amount is expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub unit: Unit,
}

/// Parse a quantity spec, returning `None` for anything that does not look
/// like `<number><unit>`.
pub fn parse_quantity_spec(spec: &str) -> Option<ParsedQuantity> {
    let caps = QUANTITY_SPEC_RE.captures(spec.trim())?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    if !amount.is_finite() {
        return None;
    }
    let unit = Unit::new(caps.get(2)?.as_str());
    Some(ParsedQuantity { amount, unit })
}
