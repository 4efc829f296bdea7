pub mod cli;
pub mod config;
pub mod cost;
pub mod pathing;
pub mod persistence;
pub mod world;
