//! Planning policy: the tunable constants of a run.
//!
//! The engine takes these as an explicit value instead of module globals so
//! runs stay pure and tests can vary them freely.

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};

/// Default supplier lead time between order and delivery, in days.
pub const DEFAULT_LEAD_TIME_DAYS: i64 = 3;

/// Default horizon length; also the "at most one order per ingredient"
/// window.
pub const DEFAULT_RECURRENCE_DAYS: u32 = 7;

/// Default day-of-week seasonality multipliers, applied to horizon days in
/// order (the curve cycles when the horizon is longer).
pub const DEFAULT_SEASONALITY: [f64; 7] = [0.85, 1.10, 0.95, 1.05, 1.15, 0.90, 1.00];

/// Tunable constants of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningPolicy {
    /// Days between placing an order and its delivery.
    pub lead_time_days: i64,

    /// Horizon length in days; at most one order per ingredient per horizon.
    pub recurrence_days: u32,

    /// Seasonality multipliers by horizon day index.
    pub seasonality: Vec<f64>,

    /// Optional presentation-only staggering of starting inventory.
    pub inventory_stagger: Option<StaggerProfile>,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            recurrence_days: DEFAULT_RECURRENCE_DAYS,
            seasonality: DEFAULT_SEASONALITY.to_vec(),
            inventory_stagger: None,
        }
    }
}

impl PlanningPolicy {
    pub fn with_lead_time_days(mut self, days: i64) -> Self {
        self.lead_time_days = days;
        self
    }

    pub fn with_recurrence_days(mut self, days: u32) -> Self {
        self.recurrence_days = days;
        self
    }

    pub fn with_seasonality(mut self, curve: Vec<f64>) -> Self {
        self.seasonality = curve;
        self
    }

    pub fn with_inventory_stagger(mut self, profile: StaggerProfile) -> Self {
        self.inventory_stagger = Some(profile);
        self
    }

    /// Seasonality multiplier for a horizon day (0-based), cycling the curve.
    pub fn seasonality_for_day(&self, day_index: usize) -> f64 {
        if self.seasonality.is_empty() {
            return 1.0;
        }
        self.seasonality[day_index % self.seasonality.len()]
    }

    /// Fail fast on configurations the simulation cannot run under.
    pub fn validate(&self) -> PlanningResult<()> {
        if self.lead_time_days < 0 {
            return Err(PlanningError::invalid_policy("lead_time_days must be >= 0"));
        }
        if self.recurrence_days == 0 {
            return Err(PlanningError::invalid_policy("recurrence_days must be >= 1"));
        }
        if self.seasonality.is_empty() {
            return Err(PlanningError::invalid_policy(
                "seasonality curve cannot be empty",
            ));
        }
        if self.seasonality.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(PlanningError::invalid_policy(
                "seasonality multipliers must be finite and non-negative",
            ));
        }
        if let Some(stagger) = &self.inventory_stagger {
            stagger.validate()?;
        }
        Ok(())
    }
}

/// Presentation-only staggering of starting inventory.
///
/// Scales the `index`-th ingredient (in name order) by
/// `base + (index % cycle) * step`, flooring the result at zero. Exists to
/// spread stockout dates across a demo week; never part of the planning
/// model proper and off unless explicitly configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaggerProfile {
    pub base: f64,
    pub step: f64,
    pub cycle: usize,
}

impl Default for StaggerProfile {
    fn default() -> Self {
        Self {
            base: 0.3,
            step: 0.12,
            cycle: 10,
        }
    }
}

impl StaggerProfile {
    /// Multiplier for the `index`-th ingredient in name order.
    pub fn factor(&self, index: usize) -> f64 {
        self.base + (index % self.cycle) as f64 * self.step
    }

    fn validate(&self) -> PlanningResult<()> {
        if self.cycle == 0 {
            return Err(PlanningError::invalid_policy("stagger cycle must be >= 1"));
        }
        if !(self.base.is_finite() && self.step.is_finite()) || self.base < 0.0 || self.step < 0.0 {
            return Err(PlanningError::invalid_policy(
                "stagger base and step must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
