//! Common traits defining interfaces for planning algorithms

use crate::kinematics::{VehicleLimits, VehicleState};
use crate::planning::{NodeId, PlanningGoal, SearchTree};
use crate::scenario::OccupancyMap;

/// Trait for motion planners working on an occupancy map.
///
/// A planner grows a [`SearchTree`] from the start state and returns the id
/// of the terminal node of a root-to-leaf path. `None` means no feasible
/// path was found within the planner's own budget; it is an ordinary
/// outcome, not an error.
pub trait Planner {
    /// Plan from `start` into the goal region of `goal`
    fn plan(
        &mut self,
        limits: &VehicleLimits,
        start: VehicleState,
        goal: &PlanningGoal,
        map: &OccupancyMap,
    ) -> Option<NodeId>;

    /// Search trace of the most recent `plan` call
    fn search_tree(&self) -> &SearchTree;
}
