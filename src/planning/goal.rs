//! Planning goal: a target pose with a per-axis tolerance box

use crate::common::{PlanningError, PlanningResult};
use crate::kinematics::VehicleState;

/// Admissible absolute deviation per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTolerance {
    x_m: f64,
    y_m: f64,
    yaw_rad: f64,
}

impl GoalTolerance {
    pub fn new(x_m: f64, y_m: f64, yaw_rad: f64) -> PlanningResult<Self> {
        for &(parameter, value) in &[("tolerance.x_m", x_m), ("tolerance.y_m", y_m), ("tolerance.yaw_rad", yaw_rad)] {
            if !(value >= 0.0) {
                return Err(PlanningError::validation(
                    parameter,
                    format!("must be non-negative, got {}", value),
                ));
            }
        }
        Ok(Self { x_m, y_m, yaw_rad })
    }

    /// Same tolerance on every axis
    pub fn uniform(epsilon: f64) -> PlanningResult<Self> {
        Self::new(epsilon, epsilon, epsilon)
    }

    pub fn x_m(&self) -> f64 {
        self.x_m
    }

    pub fn y_m(&self) -> f64 {
        self.y_m
    }

    pub fn yaw_rad(&self) -> f64 {
        self.yaw_rad
    }
}

/// Goal region of a planning run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningGoal {
    pub target: VehicleState,
    pub tolerance: GoalTolerance,
}

impl PlanningGoal {
    pub fn new(target: VehicleState, tolerance: GoalTolerance) -> Self {
        Self { target, tolerance }
    }

    /// Elementwise box test; yaw is compared without wrapping
    pub fn in_goal_region(&self, state: &VehicleState) -> bool {
        (state.x - self.target.x).abs() <= self.tolerance.x_m
            && (state.y - self.target.y).abs() <= self.tolerance.y_m
            && (state.yaw - self.target.yaw).abs() <= self.tolerance.yaw_rad
    }
}
