//! ParkingPlanner - kinematic simulation and collision checking for parking scenarios
//!
//! This crate provides a steerable bicycle model, a semantic occupancy map
//! for collision queries, and a search-tree based planner interface with a
//! forward-stepping reference planner.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod kinematics;
pub mod scenario;
pub mod planning;

// Re-export common types for convenience
pub use common::{Point2D, Polygon2D, Planner};
pub use common::{PlanningError, PlanningResult};
pub use kinematics::{RigidPose2D, VehicleLimits, VehicleState, ControlInput};
pub use scenario::{MapObject, MapParameters, ObjectKind, OccupancyMap};
pub use planning::{
    ForwardSteppingConfig, ForwardSteppingPlanner, GoalTolerance, NodeId, PlanningGoal,
    PlanningRun, SearchNode, SearchTree,
};
