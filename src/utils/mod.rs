//! Utility modules for parking_planner

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
