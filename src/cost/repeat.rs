use crate::cost::lookup::MapView;
use crate::world::cell::CellCoord;
use crate::world::occupant::OccupantDescriptor;

/// Whether an occupant's cost should be skipped when the actor is already
/// standing among similar objects.
pub fn is_repeat_ignorable(occupant: &OccupantDescriptor, min_cost: u32) -> bool {
    occupant.path_cost >= min_cost && occupant.ignore_repeat
}

pub fn contains_repeat_ignorable<M: MapView + ?Sized>(
    map: &M,
    cell: CellCoord,
    min_cost: u32,
) -> bool {
    map.occupants_at(cell)
        .iter()
        .any(|o| is_repeat_ignorable(o, min_cost))
}
