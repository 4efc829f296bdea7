use crate::world::actor::{ActorId, StatId};
use crate::world::cell::CellCoord;
use crate::world::occupant::OccupantDescriptor;
use crate::world::snow::SnowCategory;
use crate::world::terrain::TerrainDescriptor;

/// Read-only view of the grid the evaluator consults.
///
/// Implementations must be safe for concurrent reads; the evaluator never
/// writes through this trait.
pub trait MapView: Send + Sync {
    /// Whether `cell` refers to a location on this map.
    fn is_valid(&self, cell: CellCoord) -> bool;

    /// Ground descriptor, or `None` when the cell carries no terrain data.
    fn terrain_at(&self, cell: CellCoord) -> Option<&TerrainDescriptor>;

    fn snow_category_at(&self, cell: CellCoord) -> SnowCategory;

    /// Objects standing in the cell. Order carries no meaning.
    fn occupants_at(&self, cell: CellCoord) -> &[OccupantDescriptor];

    /// Whether any edifice in the cell is a door, wherever it sits among the occupants.
    fn has_door(&self, cell: CellCoord) -> bool {
        self.occupants_at(cell)
            .iter()
            .any(|o| o.is_edifice() && o.is_door())
    }
}

/// Per-actor stat source.
pub trait ActorStats: Send + Sync {
    /// Raw stat value. Penalty reductions are expected in [0, 1] but callers
    /// may hand back anything; the evaluator clamps.
    fn stat_value(&self, actor: ActorId, stat: StatId) -> f32;

    /// Ticks for one cardinal step on bare ground.
    fn ticks_per_move(&self, actor: ActorId) -> u32;
}
