pub mod batch;
pub mod evaluator;
pub mod lookup;
pub mod movement;
pub mod repeat;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::world::actor::ActorId;
use crate::world::cell::CellCoord;

pub use evaluator::CostEvaluator;
pub use lookup::{ActorStats, MapView};
pub use rules::CostRules;

/// Outcome of evaluating a cell: a finite cost, or a cell that cannot be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCost {
    Passable(u32),
    Impassable,
}

impl MoveCost {
    pub fn is_impassable(self) -> bool {
        self == MoveCost::Impassable
    }

    pub fn passable(self) -> Option<u32> {
        match self {
            MoveCost::Passable(c) => Some(c),
            MoveCost::Impassable => None,
        }
    }

    /// Flatten to the integer contract, with `impassable_cost` as the sentinel.
    pub fn ticks(self, impassable_cost: u32) -> u32 {
        match self {
            MoveCost::Passable(c) => c,
            MoveCost::Impassable => impassable_cost,
        }
    }
}

impl std::fmt::Display for MoveCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveCost::Passable(c) => write!(f, "{}", c),
            MoveCost::Impassable => write!(f, "impassable"),
        }
    }
}

/// Step cost strategy handed to a path search.
pub trait MoveCostSource {
    /// Cost of stepping from `from` into the adjacent cell `to`.
    fn move_cost(&self, from: CellCoord, to: CellCoord) -> MoveCost;
}

impl<F> MoveCostSource for F
where
    F: Fn(CellCoord, CellCoord) -> MoveCost,
{
    fn move_cost(&self, from: CellCoord, to: CellCoord) -> MoveCost {
        self(from, to)
    }
}

/// An evaluator bound to one actor on one map.
pub struct ActorCostView<'a, M: ?Sized, S: ?Sized> {
    pub evaluator: &'a CostEvaluator,
    pub map: &'a M,
    pub stats: &'a S,
    pub actor: ActorId,
}

impl<'a, M, S> ActorCostView<'a, M, S>
where
    M: MapView + ?Sized,
    S: ActorStats + ?Sized,
{
    pub fn new(evaluator: &'a CostEvaluator, map: &'a M, stats: &'a S, actor: ActorId) -> Self {
        Self {
            evaluator,
            map,
            stats,
            actor,
        }
    }

    /// Surface cost of `target` alone, without the actor's base step ticks.
    pub fn cell_cost(&self, previous: CellCoord, target: CellCoord) -> MoveCost {
        self.evaluator
            .evaluate(self.map, self.stats, self.actor, previous, target)
    }
}

impl<M, S> MoveCostSource for ActorCostView<'_, M, S>
where
    M: MapView + ?Sized,
    S: ActorStats + ?Sized,
{
    fn move_cost(&self, from: CellCoord, to: CellCoord) -> MoveCost {
        self.evaluator
            .ticks_to_move(self.map, self.stats, self.actor, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impassable_flattens_to_sentinel() {
        assert_eq!(MoveCost::Impassable.ticks(10_000), 10_000);
        assert_eq!(MoveCost::Passable(7).ticks(10_000), 7);
        assert_eq!(MoveCost::Passable(7).passable(), Some(7));
        assert!(MoveCost::Impassable.passable().is_none());
    }

    #[test]
    fn closures_are_cost_sources() {
        let flat = |_from: CellCoord, _to: CellCoord| MoveCost::Passable(3);
        assert_eq!(
            flat.move_cost(CellCoord::new(0, 0), CellCoord::new(1, 0)),
            MoveCost::Passable(3)
        );
    }

    #[test]
    fn display() {
        assert_eq!(MoveCost::Passable(12).to_string(), "12");
        assert_eq!(MoveCost::Impassable.to_string(), "impassable");
    }
}
