// Parking lot straight-line planning sample
//
// Builds a small parking lot, drives the forward-stepping planner up the
// aisle, then blocks the aisle with a parked car and plans again.

use std::error::Error;
use std::f64::consts::FRAC_PI_2;

use parking_planner::utils::Visualizer;
use parking_planner::{
    ForwardSteppingConfig, ForwardSteppingPlanner, GoalTolerance, MapObject, MapParameters,
    OccupancyMap, PlanningGoal, PlanningRun, Polygon2D, VehicleLimits, VehicleState,
};

const SPOT_WIDTH: f64 = 2.6;
const SPOT_DEPTH: f64 = 5.0;

fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Polygon2D, Box<dyn Error>> {
    Ok(Polygon2D::from_xy(&[
        (min_x, min_y),
        (min_x, max_y),
        (max_x, max_y),
        (max_x, min_y),
    ])?)
}

fn build_parking_lot() -> Result<OccupancyMap, Box<dyn Error>> {
    // ego footprint around the rear axle: 1m rear overhang, 3m forward
    let ego = rectangle(-1.0, -1.0, 3.0, 1.0)?;
    let mut map = OccupancyMap::new(MapParameters::new(100, 100, 0.5)?, ego);

    // one row of spots on each side of a vertical aisle at x = 25
    for i in 0..8 {
        let y = 5.0 + i as f64 * SPOT_WIDTH;
        map.stamp(MapObject::parking_spot(rectangle(15.0, y, 15.0 + SPOT_DEPTH, y + SPOT_WIDTH)?));
        map.stamp(MapObject::parking_spot(rectangle(30.0, y, 30.0 + SPOT_DEPTH, y + SPOT_WIDTH)?));

        if i % 3 != 1 {
            map.stamp(MapObject::parked_car(rectangle(15.5, y + 0.3, 19.5, y + 2.3)?));
        }
        if i % 2 == 0 {
            map.stamp(MapObject::parked_car(rectangle(30.5, y + 0.3, 34.5, y + 2.3)?));
        }
    }

    Ok(map)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("Parking demo start!!");

    let limits = VehicleLimits::new(2.8, 35.0_f64.to_radians(), Some(10.0_f64.to_radians()))?;
    let planner = ForwardSteppingPlanner::new(ForwardSteppingConfig::new(0.2, 1000)?);
    let start = VehicleState::new(25.0, 2.0, FRAC_PI_2);
    let goal = PlanningGoal::new(
        VehicleState::new(25.0, 40.0, FRAC_PI_2),
        GoalTolerance::uniform(0.15)?,
    );

    let mut run = PlanningRun::new(limits, build_parking_lot()?, planner, start, goal);

    match run.solve() {
        Some(terminal) => {
            let path = run.search_tree().path_to(terminal);
            println!("Reached the goal in {} steps", path.len() - 1);
        }
        None => println!("No path found on the open aisle"),
    }

    let mut vis = Visualizer::new();
    vis.set_title("Forward stepping, open aisle");
    run.render(&mut vis);
    let _ = vis.save_png("img/parking/open_aisle.png", 800, 800);

    // a car left in the aisle
    run.map_mut()
        .stamp(MapObject::parked_car(rectangle(24.0, 25.0, 26.0, 29.5)?));

    match run.solve() {
        Some(_) => println!("Unexpectedly found a path through the blocked aisle"),
        None => println!(
            "Aisle blocked, search stopped after {} nodes ({:?})",
            run.search_tree().len(),
            run.planner().stop_reason()
        ),
    }

    let mut vis = Visualizer::new();
    vis.set_title("Forward stepping, blocked aisle");
    run.render(&mut vis);
    let _ = vis.save_png("img/parking/blocked_aisle.png", 800, 800);
    let _ = vis.show();

    println!("Parking demo finish!!");
    Ok(())
}
