//! Parking scenario: semantic objects and the occupancy map they are stamped on

pub mod objects;
pub mod occupancy_map;

pub use objects::*;
pub use occupancy_map::*;
