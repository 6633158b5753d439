//! Planning error model.

use thiserror::Error;

/// Result type used across the planning engine.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Engine-level error.
///
/// Keep this focused on deterministic failures of a whole run (invalid
/// policy, impossible horizon). Data-quality problems in the inputs degrade
/// individual fields and are logged; they never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// A policy value failed validation.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// A horizon could not be constructed.
    #[error("invalid horizon: {0}")]
    InvalidHorizon(String),
}

impl PlanningError {
    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }

    pub fn invalid_horizon(msg: impl Into<String>) -> Self {
        Self::InvalidHorizon(msg.into())
    }
}
