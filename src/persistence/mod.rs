pub mod scenario;

pub use scenario::{ScenarioError, ScenarioFormat, load_scenario, save_scenario};
