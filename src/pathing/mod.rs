pub mod search;
pub mod statistics;

pub use search::{Route, RouteOptions, blocks_movement, find_route};
pub use statistics::{RouteStatistics, compute_route_statistics};
