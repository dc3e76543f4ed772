//! Kinematic model: rigid poses and the steerable bicycle model

pub mod pose;
pub mod vehicle;

pub use pose::*;
pub use vehicle::*;
