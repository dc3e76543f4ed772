//! Occupancy map of a parking scenario
//!
//! A grid of cell priorities with x along the rows and y along the columns.
//! Objects are stamped in during scenario setup; afterwards the map only
//! answers collision queries for the ego footprint.

use itertools::iproduct;
use log::{debug, trace};
use nalgebra::DMatrix;

use crate::common::{PlanningError, PlanningResult, Point2D, Polygon2D};
use crate::kinematics::VehicleState;
use crate::scenario::objects::{cell_center, MapObject, ObjectKind};

/// Validated grid dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapParameters {
    num_rows: usize,
    num_cols: usize,
    cell_size_m: f64,
}

impl MapParameters {
    pub fn new(num_rows: i64, num_cols: i64, cell_size_m: f64) -> PlanningResult<Self> {
        if num_rows < 1 {
            return Err(PlanningError::validation(
                "num_rows",
                format!("must be at least 1, got {}", num_rows),
            ));
        }
        if num_cols < 1 {
            return Err(PlanningError::validation(
                "num_cols",
                format!("must be at least 1, got {}", num_cols),
            ));
        }
        if !(cell_size_m >= 0.0) {
            return Err(PlanningError::validation(
                "cell_size_m",
                format!("must be non-negative, got {}", cell_size_m),
            ));
        }

        Ok(Self {
            num_rows: num_rows as usize,
            num_cols: num_cols as usize,
            cell_size_m,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn cell_size_m(&self) -> f64 {
        self.cell_size_m
    }
}

/// Grid map holding the highest object priority per cell
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    cells: DMatrix<i32>,
    cell_size_m: f64,
    objects: Vec<MapObject>,
    ego_footprint: Polygon2D,
}

impl OccupancyMap {
    /// Empty map; `ego_footprint` is given in the ego (rear-axle) frame
    pub fn new(params: MapParameters, ego_footprint: Polygon2D) -> Self {
        Self {
            cells: DMatrix::from_element(
                params.num_rows(),
                params.num_cols(),
                ObjectKind::Unknown.priority(),
            ),
            cell_size_m: params.cell_size_m(),
            objects: Vec::new(),
            ego_footprint,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn num_cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn cell_size_m(&self) -> f64 {
        self.cell_size_m
    }

    pub fn cells(&self) -> &DMatrix<i32> {
        &self.cells
    }

    /// Priority stored at (row, col), `None` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<i32> {
        self.cells.get((row, col)).copied()
    }

    pub fn cell_center(&self, row: usize, col: usize) -> Point2D {
        cell_center(row, col, self.cell_size_m)
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn ego_footprint(&self) -> &Polygon2D {
        &self.ego_footprint
    }

    /// Stamp `object` onto the grid and record it.
    ///
    /// Cell priorities only ever increase.
    pub fn stamp(&mut self, object: MapObject) {
        let raised = object.stamp(&mut self.cells, self.cell_size_m);
        debug!(
            "added {:?} #{}, {} cells raised",
            object.kind(),
            self.objects.len(),
            raised
        );
        self.objects.push(object);
    }

    /// Whether the ego footprint placed at `state` covers any blocking cell
    pub fn in_collision(&self, state: &VehicleState) -> bool {
        let footprint = self.ego_footprint.transformed(&state.pose());
        let bounds = footprint.bounds();

        for (row, col) in iproduct!(0..self.num_rows(), 0..self.num_cols()) {
            if !ObjectKind::blocks(self.cells[(row, col)]) {
                continue;
            }
            let center = self.cell_center(row, col);
            if center.x < bounds.min_x
                || center.x > bounds.max_x
                || center.y < bounds.min_y
                || center.y > bounds.max_y
            {
                continue;
            }
            if footprint.contains(center) {
                trace!(
                    "collision at ({:.3}, {:.3}, {:.3}) with cell ({}, {})",
                    state.x,
                    state.y,
                    state.yaw,
                    row,
                    col
                );
                return true;
            }
        }

        false
    }
}
