pub mod actor;
pub mod cell;
pub mod generation;
pub mod grid;
pub mod occupant;
pub mod snow;
pub mod terrain;

use serde::{Deserialize, Serialize};

use crate::config::generation::ScenarioParams;
pub use actor::{ActorId, ActorProfile, ActorRoster, Equipment, StatId};
pub use cell::CellCoord;
pub use grid::{CellState, GridMap};
pub use occupant::{OccupantDescriptor, OccupantKind};
pub use snow::SnowCategory;
pub use terrain::{Passability, TerrainDescriptor, TerrainKind};

/// A map plus the actors that move over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub created_at: String,
    /// Present when the scenario was generated rather than hand-written.
    #[serde(default)]
    pub params: Option<ScenarioParams>,
    /// Door cell of each generated hut.
    #[serde(default)]
    pub huts: Vec<CellCoord>,
    pub map: GridMap,
    #[serde(default)]
    pub actors: ActorRoster,
}
