//! Common types used throughout parking_planner

use nalgebra::Vector2;

use crate::common::error::{PlanningError, PlanningResult};
use crate::kinematics::RigidPose2D;

/// Points closer than this to a polygon edge count as lying on it.
const EDGE_TOLERANCE: f64 = 1e-12;

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Closed simple polygon, vertices in order (either winding).
///
/// Containment is strict: a point on an edge or a vertex is outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    vertices: Vec<Point2D>,
}

impl Polygon2D {
    /// Create a polygon from at least three vertices
    pub fn new(vertices: Vec<Point2D>) -> PlanningResult<Self> {
        if vertices.len() < 3 {
            return Err(PlanningError::validation(
                "vertices",
                format!("a polygon needs at least 3 vertices, got {}", vertices.len()),
            ));
        }
        Ok(Self { vertices })
    }

    /// Create a polygon from (x, y) tuples
    pub fn from_xy(points: &[(f64, f64)]) -> PlanningResult<Self> {
        Self::new(points.iter().map(|&p| Point2D::from(p)).collect())
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Strict point-in-polygon test (even-odd ray crossing)
    pub fn contains(&self, point: Point2D) -> bool {
        if self.on_boundary(point) {
            return false;
        }

        let (u, v) = (point.x, point.y);
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let (xi, yi) = (self.vertices[i].x, self.vertices[i].y);
            let (xj, yj) = (self.vertices[j].x, self.vertices[j].y);

            if ((yi > v) != (yj > v)) && (u < (xj - xi) * (v - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    fn on_boundary(&self, point: Point2D) -> bool {
        self.edges().any(|(a, b)| {
            let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
            if cross.abs() > EDGE_TOLERANCE {
                return false;
            }
            point.x >= a.x.min(b.x) - EDGE_TOLERANCE
                && point.x <= a.x.max(b.x) + EDGE_TOLERANCE
                && point.y >= a.y.min(b.y) - EDGE_TOLERANCE
                && point.y <= a.y.max(b.y) + EDGE_TOLERANCE
        })
    }

    /// Iterate over edges as (start, end) pairs, closing the ring
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Map every vertex from `pose`'s frame into its parent frame
    pub fn transformed(&self, pose: &RigidPose2D) -> Polygon2D {
        Polygon2D {
            vertices: self
                .vertices
                .iter()
                .map(|&p| pose.transform_point(p))
                .collect(),
        }
    }

    pub fn bounds(&self) -> Bounds2D {
        self.vertices.iter().fold(
            Bounds2D {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Bounds2D {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    /// Closed ring coordinates (first vertex repeated at the end), for plotting
    pub fn exterior_xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.vertices
            .iter()
            .chain(self.vertices.first())
            .map(|p| (p.x, p.y))
            .unzip()
    }
}
