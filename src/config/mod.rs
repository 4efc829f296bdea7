pub mod cost;
pub mod generation;
