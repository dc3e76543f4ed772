//! Rigid 2D transform (x, y, yaw)
//!
//! A pose doubles as a transform from its own frame into the parent frame.
//! Composition is the product of the 3x3 homogeneous matrices:
//!
//! ```text
//! | cos(yaw)  -sin(yaw)  x |
//! | sin(yaw)   cos(yaw)  y |
//! |    0          0      1 |
//! ```

use nalgebra::{Matrix3, Vector3};

use crate::common::{PlanningError, PlanningResult, Point2D};

/// Allowed deviation of the bottom row from [0, 0, 1]
pub const HOMOGENEOUS_TOLERANCE: f64 = 1e-3;

/// Immutable 2D rigid transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidPose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl RigidPose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        let (s, c) = self.yaw.sin_cos();
        Matrix3::new(
            c, -s, self.x,
            s, c, self.y,
            0.0, 0.0, 1.0,
        )
    }

    /// Rebuild a pose from a homogeneous matrix.
    ///
    /// Fails when the bottom row is not [0, 0, 1] within
    /// [`HOMOGENEOUS_TOLERANCE`].
    pub fn from_matrix(matrix: &Matrix3<f64>) -> PlanningResult<Self> {
        let bottom = [matrix[(2, 0)], matrix[(2, 1)], matrix[(2, 2)]];
        let expected = [0.0, 0.0, 1.0];
        let homogeneous = bottom
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).abs() <= HOMOGENEOUS_TOLERANCE);

        if !homogeneous {
            return Err(PlanningError::Geometry(format!(
                "not a homogeneous transform, bottom row is [{}, {}, {}]",
                bottom[0], bottom[1], bottom[2]
            )));
        }

        Ok(Self::from_homogeneous(matrix))
    }

    /// `other` expressed in this pose's frame, expressed in this pose's parent frame
    pub fn compose(&self, other: &RigidPose2D) -> Self {
        // the product of two homogeneous matrices keeps the bottom row exact
        Self::from_homogeneous(&(self.to_matrix() * other.to_matrix()))
    }

    pub fn invert(&self) -> Self {
        // [R^T, -R^T t; 0, 1]
        let (s, c) = self.yaw.sin_cos();
        Self {
            x: -c * self.x - s * self.y,
            y: s * self.x - c * self.y,
            yaw: (-s).atan2(c),
        }
    }

    fn from_homogeneous(matrix: &Matrix3<f64>) -> Self {
        debug_assert!((matrix[(2, 2)] - 1.0).abs() <= HOMOGENEOUS_TOLERANCE);
        Self {
            x: matrix[(0, 2)],
            y: matrix[(1, 2)],
            yaw: matrix[(1, 0)].atan2(matrix[(0, 0)]),
        }
    }

    /// Map a point from this pose's frame into the parent frame
    pub fn transform_point(&self, point: Point2D) -> Point2D {
        let p = self.to_matrix() * Vector3::new(point.x, point.y, 1.0);
        Point2D::new(p[0], p[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_matrix_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pose = RigidPose2D::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                // (-pi, pi]
                PI - rng.gen_range(0.0..2.0 * PI),
            );
            let rebuilt = RigidPose2D::from_matrix(&pose.to_matrix()).unwrap();
            assert_abs_diff_eq!(rebuilt.x, pose.x, epsilon = 1e-6);
            assert_abs_diff_eq!(rebuilt.y, pose.y, epsilon = 1e-6);
            assert_abs_diff_eq!(rebuilt.yaw, pose.yaw, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_from_matrix_rejects_non_homogeneous() {
        let mut matrix = RigidPose2D::new(1.0, 2.0, 0.3).to_matrix();
        matrix[(2, 1)] = 0.5;
        assert!(matches!(
            RigidPose2D::from_matrix(&matrix),
            Err(PlanningError::Geometry(_))
        ));

        // within tolerance is still accepted
        let mut matrix = RigidPose2D::new(1.0, 2.0, 0.3).to_matrix();
        matrix[(2, 2)] = 1.0 + 5e-4;
        assert!(RigidPose2D::from_matrix(&matrix).is_ok());
    }

    #[test]
    fn test_compose() {
        let a = RigidPose2D::new(1.0, 0.0, FRAC_PI_2);
        let b = RigidPose2D::new(1.0, 0.0, 0.0);
        let c = a.compose(&b);
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(c.y, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(c.yaw, FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invert_composes_to_identity() {
        let pose = RigidPose2D::new(3.0, -2.0, 2.1);
        let identity = pose.compose(&pose.invert());
        assert_abs_diff_eq!(identity.x, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(identity.y, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(identity.yaw, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_invert_matches_matrix_inverse() {
        let pose = RigidPose2D::new(-4.0, 7.5, -0.8);
        let expected = RigidPose2D::from_matrix(&pose.to_matrix().try_inverse().unwrap()).unwrap();
        let inverted = pose.invert();
        assert_abs_diff_eq!(inverted.x, expected.x, epsilon = 1e-10);
        assert_abs_diff_eq!(inverted.y, expected.y, epsilon = 1e-10);
        assert_abs_diff_eq!(inverted.yaw, expected.yaw, epsilon = 1e-10);
    }

    #[test]
    fn test_transform_point() {
        let pose = RigidPose2D::new(1.0, 0.0, FRAC_PI_2);
        let world = pose.transform_point(Point2D::new(1.0, 0.0));
        assert_abs_diff_eq!(world.x, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(world.y, 1.0, epsilon = 1e-10);
    }
}
