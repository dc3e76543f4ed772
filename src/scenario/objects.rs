//! Semantic objects that can be placed in a parking scenario
//!
//! Every object stamps its priority onto the map cells whose centers lie
//! inside its footprint. A cell keeps the highest priority stamped on it, so
//! a parked car overrides the parking spot it stands in.

use itertools::iproduct;
use log::trace;
use nalgebra::DMatrix;

use crate::common::{Point2D, Polygon2D};

/// Priority of a map cell's semantic label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ObjectKind {
    Unknown = 0,
    ParkingSpot = 1,
    /// Threshold; kinds at or above it must not overlap the ego vehicle
    ObjectNoOverlappingAllowed = 100,
    Car = 101,
}

impl ObjectKind {
    /// Priority value stored in the map
    pub fn priority(self) -> i32 {
        self as i32
    }

    /// Kind for a stored priority, if it is one of the known values
    pub fn from_priority(priority: i32) -> Option<Self> {
        match priority {
            0 => Some(ObjectKind::Unknown),
            1 => Some(ObjectKind::ParkingSpot),
            100 => Some(ObjectKind::ObjectNoOverlappingAllowed),
            101 => Some(ObjectKind::Car),
            _ => None,
        }
    }

    /// Whether a cell holding `priority` blocks the ego vehicle
    pub fn blocks(priority: i32) -> bool {
        priority > ObjectKind::ObjectNoOverlappingAllowed.priority()
    }

    pub fn participates_in_collision(self) -> bool {
        Self::blocks(self.priority())
    }
}

impl Default for ObjectKind {
    fn default() -> Self {
        ObjectKind::Unknown
    }
}

/// World-frame center of a cell: rows run along x, columns along y
pub fn cell_center(row: usize, col: usize, cell_size_m: f64) -> Point2D {
    Point2D::new(
        (row as f64 + 0.5) * cell_size_m,
        (col as f64 + 0.5) * cell_size_m,
    )
}

/// Objects present in a parking scenario
#[derive(Debug, Clone, PartialEq)]
pub enum MapObject {
    /// A parked car, footprint in the world frame
    ParkedCar { footprint: Polygon2D },
    /// Parking spot marking; never collides
    ParkingSpot { footprint: Polygon2D },
}

impl MapObject {
    pub fn parked_car(footprint: Polygon2D) -> Self {
        MapObject::ParkedCar { footprint }
    }

    pub fn parking_spot(footprint: Polygon2D) -> Self {
        MapObject::ParkingSpot { footprint }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            MapObject::ParkedCar { .. } => ObjectKind::Car,
            MapObject::ParkingSpot { .. } => ObjectKind::ParkingSpot,
        }
    }

    pub fn footprint(&self) -> &Polygon2D {
        match self {
            MapObject::ParkedCar { footprint } | MapObject::ParkingSpot { footprint } => footprint,
        }
    }

    /// Raise every covered cell to this object's priority.
    ///
    /// Returns the number of cells whose value actually increased.
    pub fn stamp(&self, cells: &mut DMatrix<i32>, cell_size_m: f64) -> usize {
        let priority = self.kind().priority();
        let footprint = self.footprint();
        let mut raised = 0;

        for (row, col) in iproduct!(0..cells.nrows(), 0..cells.ncols()) {
            if cells[(row, col)] >= priority {
                continue;
            }
            if footprint.contains(cell_center(row, col, cell_size_m)) {
                cells[(row, col)] = priority;
                raised += 1;
            }
        }

        trace!("{:?} stamped, {} cells raised", self.kind(), raised);
        raised
    }
}
