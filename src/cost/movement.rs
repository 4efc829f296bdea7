use crate::cost::MoveCost;
use crate::cost::evaluator::CostEvaluator;
use crate::cost::lookup::{ActorStats, MapView};
use crate::world::actor::ActorId;
use crate::world::cell::CellCoord;

impl CostEvaluator {
    /// Total ticks for `actor` to step from `from` into the adjacent cell `to`:
    /// the actor's own step time (longer on diagonals) plus the cell cost,
    /// bounded to `1..=max_move_ticks`.
    pub fn ticks_to_move<M, S>(
        &self,
        map: &M,
        stats: &S,
        actor: ActorId,
        from: CellCoord,
        to: CellCoord,
    ) -> MoveCost
    where
        M: MapView + ?Sized,
        S: ActorStats + ?Sized,
    {
        let cell_cost = match self.evaluate(map, stats, actor, from, to) {
            MoveCost::Passable(c) => c,
            MoveCost::Impassable => return MoveCost::Impassable,
        };

        let base = stats.ticks_per_move(actor);
        let step = if from.is_valid() && from.is_diagonal_to(to) {
            diagonal_ticks(base)
        } else {
            base
        };

        let total = step.saturating_add(cell_cost);
        MoveCost::Passable(total.clamp(1, self.rules().max_move_ticks))
    }
}

pub fn diagonal_ticks(cardinal: u32) -> u32 {
    (cardinal as f64 * std::f64::consts::SQRT_2).round() as u32
}
