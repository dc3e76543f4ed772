//! Planning run: aggregates vehicle, scenario, planner, start and goal

use crate::common::Planner;
use crate::kinematics::{VehicleLimits, VehicleState};
use crate::planning::goal::PlanningGoal;
use crate::planning::search_tree::{NodeId, SearchTree};
use crate::scenario::OccupancyMap;
use crate::utils::Visualizer;

/// Draw the ego footprint for every n-th node of the search trace
const RENDER_NODE_STRIDE: usize = 10;

/// A planning problem ready to be solved
pub struct PlanningRun<P: Planner> {
    limits: VehicleLimits,
    map: OccupancyMap,
    planner: P,
    start: VehicleState,
    goal: PlanningGoal,
    solution: Option<NodeId>,
}

impl<P: Planner> PlanningRun<P> {
    pub fn new(
        limits: VehicleLimits,
        map: OccupancyMap,
        planner: P,
        start: VehicleState,
        goal: PlanningGoal,
    ) -> Self {
        Self {
            limits,
            map,
            planner,
            start,
            goal,
            solution: None,
        }
    }

    /// Run the planner; `None` means no feasible path
    pub fn solve(&mut self) -> Option<NodeId> {
        self.solution = self
            .planner
            .plan(&self.limits, self.start, &self.goal, &self.map);
        self.solution
    }

    /// States from start to the terminal node of the last solution
    pub fn solution_path(&self) -> Option<Vec<VehicleState>> {
        self.solution.map(|id| self.search_tree().path_to(id))
    }

    pub fn search_tree(&self) -> &SearchTree {
        self.planner.search_tree()
    }

    pub fn limits(&self) -> &VehicleLimits {
        &self.limits
    }

    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    /// Scenario access for adding objects between solves
    pub fn map_mut(&mut self) -> &mut OccupancyMap {
        &mut self.map
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn start(&self) -> VehicleState {
        self.start
    }

    pub fn goal(&self) -> &PlanningGoal {
        &self.goal
    }

    /// Draw the scenario, the search trace and the solution
    pub fn render(&self, vis: &mut Visualizer) {
        vis.plot_map(&self.map);
        vis.plot_search_trace(self.search_tree(), self.map.ego_footprint(), RENDER_NODE_STRIDE);
        if let Some(path) = self.solution_path() {
            vis.plot_vehicle_path(&path);
        }
        vis.plot_pose(&self.start.pose(), "Start", crate::utils::colors::START);
        vis.plot_pose(&self.goal.target.pose(), "Goal", crate::utils::colors::GOAL);
    }
}
