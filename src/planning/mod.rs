// Planning: search tree, goal region, planners and the run that ties them together

pub mod search_tree;
pub mod goal;
pub mod forward_stepping;
pub mod problem;

pub use search_tree::*;
pub use goal::*;
pub use forward_stepping::*;
pub use problem::*;
