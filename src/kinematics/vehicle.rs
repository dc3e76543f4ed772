//! Vehicle limits, control input and state
//!
//! Implements a kinematic bicycle model whose front and rear wheels steer
//! independently. The control point is the center of the rear axle.

use std::ops::Deref;

use log::warn;

use crate::common::{PlanningError, PlanningResult};
use crate::kinematics::pose::RigidPose2D;

/// Below this curvature [1/m] the motion is treated as a straight line
pub const STRAIGHT_LINE_CURVATURE: f64 = 1e-6;

/// Physical limits of the vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleLimits {
    wheelbase_m: f64,
    front_wheel_angle_limit_rad: f64,
    rear_wheel_angle_limit_rad: Option<f64>,
}

impl VehicleLimits {
    /// Create validated limits.
    ///
    /// Negative values are rejected, zero is accepted. `None` for the rear
    /// limit means the rear wheels do not steer.
    pub fn new(
        wheelbase_m: f64,
        front_wheel_angle_limit_rad: f64,
        rear_wheel_angle_limit_rad: Option<f64>,
    ) -> PlanningResult<Self> {
        check_non_negative("wheelbase_m", wheelbase_m)?;
        check_non_negative("front_wheel_angle_limit_rad", front_wheel_angle_limit_rad)?;
        if let Some(limit) = rear_wheel_angle_limit_rad {
            check_non_negative("rear_wheel_angle_limit_rad", limit)?;
        }

        Ok(Self {
            wheelbase_m,
            front_wheel_angle_limit_rad,
            rear_wheel_angle_limit_rad,
        })
    }

    pub fn wheelbase_m(&self) -> f64 {
        self.wheelbase_m
    }

    pub fn front_wheel_angle_limit_rad(&self) -> f64 {
        self.front_wheel_angle_limit_rad
    }

    pub fn rear_wheel_angle_limit_rad(&self) -> Option<f64> {
        self.rear_wheel_angle_limit_rad
    }

    /// Front wheel angle clamped to the front limit
    pub fn clamp_front(&self, angle: f64) -> f64 {
        angle.clamp(-self.front_wheel_angle_limit_rad, self.front_wheel_angle_limit_rad)
    }

    /// Rear wheel angle clamped to the rear limit, zero without rear steering
    pub fn clamp_rear(&self, angle: f64) -> f64 {
        match self.rear_wheel_angle_limit_rad {
            Some(limit) => angle.clamp(-limit, limit),
            None => 0.0,
        }
    }
}

impl Default for VehicleLimits {
    fn default() -> Self {
        Self {
            wheelbase_m: 2.5,
            front_wheel_angle_limit_rad: 30.0_f64.to_radians(),
            rear_wheel_angle_limit_rad: None,
        }
    }
}

fn check_non_negative(parameter: &'static str, value: f64) -> PlanningResult<()> {
    // also rejects NaN
    if !(value >= 0.0) {
        return Err(PlanningError::validation(
            parameter,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

/// One commanded motion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInput {
    /// Signed distance travelled by the control point [m]
    pub distance_moved_m: f64,
    pub front_wheel_angle_rad: f64,
    pub rear_wheel_angle_rad: f64,
}

impl ControlInput {
    pub fn new(distance_moved_m: f64, front_wheel_angle_rad: f64, rear_wheel_angle_rad: f64) -> Self {
        Self {
            distance_moved_m,
            front_wheel_angle_rad,
            rear_wheel_angle_rad,
        }
    }

    /// Drive `distance_moved_m` with both wheels straight
    pub fn forward(distance_moved_m: f64) -> Self {
        Self::new(distance_moved_m, 0.0, 0.0)
    }
}

/// Pose of the rear-axle center in the world frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    pose: RigidPose2D,
}

impl VehicleState {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self {
            pose: RigidPose2D::new(x, y, yaw),
        }
    }

    pub fn pose(&self) -> RigidPose2D {
        self.pose
    }

    /// Apply one control input and return the resulting state.
    ///
    /// Wheel angles are clamped to `limits` first. Near-zero curvature is
    /// handled as a pure translation along the front wheel direction, since
    /// the center of rotation is singular there.
    pub fn step(&self, limits: &VehicleLimits, input: &ControlInput) -> VehicleState {
        let front = limits.clamp_front(input.front_wheel_angle_rad);
        let rear = limits.clamp_rear(input.rear_wheel_angle_rad);
        let distance = input.distance_moved_m;

        let tan_diff = front.tan() - rear.tan();
        let curvature = if tan_diff == 0.0 {
            0.0
        } else {
            tan_diff / limits.wheelbase_m()
        };

        if !curvature.is_finite() {
            warn!(
                "degenerate curvature {} (wheelbase {}), state left unchanged",
                curvature,
                limits.wheelbase_m()
            );
            return *self;
        }

        let delta = if curvature.abs() < STRAIGHT_LINE_CURVATURE {
            RigidPose2D::new(distance * front.cos(), distance * front.sin(), 0.0)
        } else {
            // instantaneous center of rotation in the ego frame
            let center = RigidPose2D::new(
                -rear.tan() / curvature,
                1.0 / curvature,
                -std::f64::consts::FRAC_PI_2 + rear,
            );
            let rotation = RigidPose2D::new(0.0, 0.0, distance * curvature);
            center.compose(&rotation).compose(&center.invert())
        };

        VehicleState::from(self.pose.compose(&delta))
    }
}

impl From<RigidPose2D> for VehicleState {
    fn from(pose: RigidPose2D) -> Self {
        Self { pose }
    }
}

impl Deref for VehicleState {
    type Target = RigidPose2D;

    fn deref(&self) -> &Self::Target {
        &self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

    #[test]
    fn test_vehicle_limits_validation() {
        assert!(VehicleLimits::new(-1.0, 1.0, Some(1.0)).is_err());
        assert!(VehicleLimits::new(1.0, -1.0, Some(1.0)).is_err());
        assert!(VehicleLimits::new(1.0, 1.0, Some(-1.0)).is_err());
        assert!(VehicleLimits::new(f64::NAN, 1.0, None).is_err());
        // zero is accepted
        assert!(VehicleLimits::new(0.0, 0.0, Some(0.0)).is_ok());
        assert!(VehicleLimits::new(1.0, 1.0, None).is_ok());
    }

    #[test]
    fn test_vehicle_limits_error_names_parameter() {
        match VehicleLimits::new(1.0, 1.0, Some(-0.5)) {
            Err(PlanningError::Validation { parameter, .. }) => {
                assert_eq!(parameter, "rear_wheel_angle_limit_rad")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_clamping() {
        let limits = VehicleLimits::new(3.0, FRAC_PI_4, None).unwrap();
        assert_eq!(limits.clamp_front(PI), FRAC_PI_4);
        assert_eq!(limits.clamp_front(-PI), -FRAC_PI_4);
        assert_eq!(limits.clamp_front(0.1), 0.1);
        assert_eq!(limits.clamp_rear(0.3), 0.0);
    }

    #[test]
    fn test_kinematics_straight_line() {
        let initial = VehicleState::new(1.0, 5.0, -FRAC_PI_2);
        let limits = VehicleLimits::new(3.0, PI, Some(PI)).unwrap();
        // drifting sideways by 1m
        let input = ControlInput::new(1.0, -FRAC_PI_2, -FRAC_PI_2);

        let next = initial.step(&limits, &input);
        assert_abs_diff_eq!(next.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(next.y, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(next.yaw, -FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_kinematics_equal_angles_translate() {
        let limits = VehicleLimits::new(2.0, 1.0, Some(1.0)).unwrap();
        let initial = VehicleState::new(-3.0, 2.0, 0.4);
        for &(distance, angle) in &[(0.5, 0.3), (-2.0, -0.7), (4.0, 1.0)] {
            let next = initial.step(&limits, &ControlInput::new(distance, angle, angle));
            let heading = initial.yaw + angle;
            assert_abs_diff_eq!(next.x, initial.x + distance * heading.cos(), epsilon = 1e-6);
            assert_abs_diff_eq!(next.y, initial.y + distance * heading.sin(), epsilon = 1e-6);
            assert_abs_diff_eq!(next.yaw, initial.yaw, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_kinematics_front_wheel_steer_only() {
        let initial = VehicleState::new(0.0, 0.0, FRAC_PI_2);
        let limits = VehicleLimits::new(3.0, FRAC_PI_4, Some(FRAC_PI_4)).unwrap();
        let wheel_angle = -FRAC_PI_8;
        let radius = (limits.wheelbase_m() / wheel_angle.tan()).abs();
        let input = ControlInput::new(PI * radius / 2.0, wheel_angle, 0.0);

        let next = initial.step(&limits, &input);
        assert_abs_diff_eq!(next.x, radius, epsilon = 1e-6);
        assert_abs_diff_eq!(next.y, radius, epsilon = 1e-6);
        assert_abs_diff_eq!(next.yaw, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_kinematics_clamps_before_turning() {
        // commanded far beyond the limit, so it turns as if at the limit
        let limits = VehicleLimits::new(3.0, FRAC_PI_8, None).unwrap();
        let initial = VehicleState::new(0.0, 0.0, 0.0);
        let clamped = initial.step(&limits, &ControlInput::new(2.0, FRAC_PI_2 * 0.9, 0.5));
        let at_limit = initial.step(&limits, &ControlInput::new(2.0, FRAC_PI_8, 0.0));
        assert_abs_diff_eq!(clamped.x, at_limit.x, epsilon = 1e-12);
        assert_abs_diff_eq!(clamped.y, at_limit.y, epsilon = 1e-12);
        assert_abs_diff_eq!(clamped.yaw, at_limit.yaw, epsilon = 1e-12);
        // positive front angle turns left
        assert!(at_limit.yaw > 0.0);
    }

    #[test]
    fn test_kinematics_zero_wheelbase() {
        let limits = VehicleLimits::new(0.0, 0.5, Some(0.5)).unwrap();
        let initial = VehicleState::new(1.0, 1.0, 0.0);

        // equal angles still translate
        let next = initial.step(&limits, &ControlInput::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(next.x, 2.0, epsilon = 1e-12);

        // infinite curvature leaves the state unchanged
        let next = initial.step(&limits, &ControlInput::new(1.0, 0.3, 0.0));
        assert_eq!(next, initial);
    }

    #[test]
    fn test_vehicle_state_derefs_to_pose() {
        let state = VehicleState::from(RigidPose2D::new(1.0, 2.0, 0.5));
        assert_eq!((state.x, state.y, state.yaw), (1.0, 2.0, 0.5));
        assert_eq!(state.pose().to_matrix(), RigidPose2D::new(1.0, 2.0, 0.5).to_matrix());
    }
}
