//! Error types for parking_planner

use thiserror::Error;

/// Main error type for scenario construction and geometry
#[derive(Debug, Error)]
pub enum PlanningError {
    /// A construction parameter is out of its admissible range
    #[error("Invalid parameter `{parameter}`: {reason}")]
    Validation {
        parameter: &'static str,
        reason: String,
    },
    /// A transform matrix is not a valid homogeneous 2D transform
    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl PlanningError {
    pub(crate) fn validation(parameter: &'static str, reason: impl Into<String>) -> Self {
        PlanningError::Validation {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Result type alias for parking_planner operations
pub type PlanningResult<T> = Result<T, PlanningError>;
