//! Forward-stepping reference planner
//!
//! Drives straight ahead in fixed steps until the goal region is reached,
//! the next step would collide, or the step budget runs out. It never
//! branches or backtracks: every node gets at most one child.

use log::{debug, info};

use crate::common::{PlanningError, PlanningResult, Planner};
use crate::kinematics::{ControlInput, VehicleLimits, VehicleState};
use crate::planning::goal::PlanningGoal;
use crate::planning::search_tree::{NodeId, SearchTree};
use crate::scenario::OccupancyMap;

/// Configuration for the forward-stepping planner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardSteppingConfig {
    /// Distance driven per step [m]
    pub step_distance: f64,
    /// Maximum number of steps
    pub max_steps: usize,
}

impl ForwardSteppingConfig {
    pub fn new(step_distance: f64, max_steps: usize) -> PlanningResult<Self> {
        if !(step_distance >= 0.0) || step_distance.is_infinite() {
            return Err(PlanningError::validation(
                "step_distance",
                format!("must be finite and non-negative, got {}", step_distance),
            ));
        }
        Ok(Self {
            step_distance,
            max_steps,
        })
    }
}

impl Default for ForwardSteppingConfig {
    fn default() -> Self {
        Self {
            step_distance: 0.2,
            max_steps: 1000,
        }
    }
}

/// Why the last search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GoalReached,
    Collision,
    BudgetExhausted,
}

/// Planner that only samples straight forward motion
#[derive(Debug, Clone, Default)]
pub struct ForwardSteppingPlanner {
    config: ForwardSteppingConfig,
    tree: SearchTree,
    stop_reason: Option<StopReason>,
}

impl ForwardSteppingPlanner {
    pub fn new(config: ForwardSteppingConfig) -> Self {
        Self {
            config,
            tree: SearchTree::new(),
            stop_reason: None,
        }
    }

    pub fn config(&self) -> &ForwardSteppingConfig {
        &self.config
    }

    /// Why the most recent `plan` call stopped expanding
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }
}

impl Planner for ForwardSteppingPlanner {
    fn plan(
        &mut self,
        limits: &VehicleLimits,
        start: VehicleState,
        goal: &PlanningGoal,
        map: &OccupancyMap,
    ) -> Option<NodeId> {
        info!(
            "forward stepping from ({:.2}, {:.2}, {:.2}), step {} m, budget {}",
            start.x, start.y, start.yaw, self.config.step_distance, self.config.max_steps
        );

        self.tree.clear();
        let input = ControlInput::forward(self.config.step_distance);
        let mut latest = self.tree.add_root(start);
        let mut latest_state = start;
        let mut num_steps = 0;
        let mut reason = StopReason::BudgetExhausted;

        while num_steps < self.config.max_steps && !goal.in_goal_region(&latest_state) {
            num_steps += 1;
            let next_state = latest_state.step(limits, &input);

            if map.in_collision(&next_state) {
                debug!(
                    "collision at step {} ({:.2}, {:.2}), stop expanding",
                    num_steps, next_state.x, next_state.y
                );
                reason = StopReason::Collision;
                break;
            }

            latest = self.tree.add_child(latest, next_state, input);
            latest_state = next_state;
        }

        let reached = goal.in_goal_region(&latest_state);
        if reached {
            reason = StopReason::GoalReached;
        }
        self.stop_reason = Some(reason);
        info!(
            "forward stepping stopped: {:?} after {} steps, {} nodes",
            reason,
            num_steps,
            self.tree.len()
        );

        if reached {
            Some(latest)
        } else {
            None
        }
    }

    fn search_tree(&self) -> &SearchTree {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Polygon2D;
    use crate::planning::GoalTolerance;
    use crate::scenario::{MapObject, MapParameters};
    use std::f64::consts::FRAC_PI_2;

    fn open_map() -> OccupancyMap {
        let params = MapParameters::new(100, 100, 1.0).unwrap();
        let ego = Polygon2D::from_xy(&[(-1.0, -1.0), (-1.0, 1.0), (3.0, 1.0), (3.0, -1.0)]).unwrap();
        OccupancyMap::new(params, ego)
    }

    fn goal_ahead() -> PlanningGoal {
        PlanningGoal::new(
            VehicleState::new(10.0, 55.0, FRAC_PI_2),
            GoalTolerance::uniform(0.15).unwrap(),
        )
    }

    #[test]
    fn test_config_validation() {
        assert!(ForwardSteppingConfig::new(-0.2, 10).is_err());
        assert!(ForwardSteppingConfig::new(f64::INFINITY, 10).is_err());
        assert!(ForwardSteppingConfig::new(0.2, 10).is_ok());
        let config = ForwardSteppingConfig::default();
        assert_eq!(config.step_distance, 0.2);
        assert_eq!(config.max_steps, 1000);
    }

    #[test]
    fn test_reaches_goal_on_open_map() {
        let limits = VehicleLimits::new(3.0, 0.5, None).unwrap();
        let mut planner = ForwardSteppingPlanner::new(ForwardSteppingConfig::new(0.2, 1000).unwrap());
        let start = VehicleState::new(10.0, 10.0, FRAC_PI_2);

        let terminal = planner.plan(&limits, start, &goal_ahead(), &open_map()).unwrap();
        assert_eq!(planner.stop_reason(), Some(StopReason::GoalReached));

        let tree = planner.search_tree();
        let path = tree.path_to(terminal);
        assert_eq!(path.len(), tree.len());
        assert_eq!(path[0], start);
        assert!(goal_ahead().in_goal_region(path.last().unwrap()));
        // one child per node
        assert!(tree.iter().all(|(_, n)| n.children.len() <= 1));
        assert!(tree
            .iter()
            .skip(1)
            .all(|(_, n)| n.input == Some(ControlInput::forward(0.2))));
    }

    #[test]
    fn test_blocked_by_parked_car() {
        let limits = VehicleLimits::new(3.0, 0.5, None).unwrap();
        let mut planner = ForwardSteppingPlanner::new(ForwardSteppingConfig::new(0.2, 1000).unwrap());
        let mut map = open_map();
        let car = Polygon2D::from_xy(&[(9.0, 40.0), (9.0, 46.0), (11.0, 46.0), (11.0, 40.0)]).unwrap();
        map.stamp(MapObject::parked_car(car));

        let start = VehicleState::new(10.0, 10.0, FRAC_PI_2);
        assert!(planner.plan(&limits, start, &goal_ahead(), &map).is_none());
        assert_eq!(planner.stop_reason(), Some(StopReason::Collision));

        // the trace stops short of the car and never collides
        let tree = planner.search_tree();
        assert!(tree.len() > 1);
        assert!(tree.iter().all(|(_, n)| !map.in_collision(&n.state)));
        assert!(tree.iter().all(|(_, n)| n.state.y < 40.0));
    }

    #[test]
    fn test_budget_exhausted() {
        let limits = VehicleLimits::default();
        let mut planner = ForwardSteppingPlanner::new(ForwardSteppingConfig::new(0.2, 10).unwrap());
        let start = VehicleState::new(10.0, 10.0, FRAC_PI_2);

        assert!(planner.plan(&limits, start, &goal_ahead(), &open_map()).is_none());
        assert_eq!(planner.stop_reason(), Some(StopReason::BudgetExhausted));
        assert_eq!(planner.search_tree().len(), 11);
    }

    #[test]
    fn test_start_inside_goal() {
        let limits = VehicleLimits::default();
        let mut planner = ForwardSteppingPlanner::default();
        let start = VehicleState::new(10.0, 55.0, FRAC_PI_2);

        let terminal = planner.plan(&limits, start, &goal_ahead(), &open_map());
        assert_eq!(terminal, Some(NodeId(0)));
        assert_eq!(planner.search_tree().len(), 1);
    }

    #[test]
    fn test_replanning_resets_trace() {
        let limits = VehicleLimits::default();
        let mut planner = ForwardSteppingPlanner::new(ForwardSteppingConfig::new(0.2, 5).unwrap());
        let start = VehicleState::new(10.0, 10.0, FRAC_PI_2);
        planner.plan(&limits, start, &goal_ahead(), &open_map());
        planner.plan(&limits, start, &goal_ahead(), &open_map());
        assert_eq!(planner.search_tree().len(), 6);
    }
}
