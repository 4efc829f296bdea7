use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cost::MoveCost;
use crate::cost::evaluator::CostEvaluator;
use crate::cost::lookup::{ActorStats, MapView};
use crate::world::actor::ActorId;
use crate::world::cell::CellCoord;
use crate::world::grid::GridMap;

/// One evaluation to run: `actor` entering `target` from `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub actor: ActorId,
    pub previous: CellCoord,
    pub target: CellCoord,
}

/// Evaluate many requests in parallel. Results line up with `requests`.
///
/// Each evaluation only reads the map and stats, so rayon workers share
/// them without locking.
pub fn evaluate_batch<M, S>(
    evaluator: &CostEvaluator,
    map: &M,
    stats: &S,
    requests: &[MoveRequest],
) -> Vec<MoveCost>
where
    M: MapView + ?Sized,
    S: ActorStats + ?Sized,
{
    requests
        .par_iter()
        .map(|r| evaluator.evaluate(map, stats, r.actor, r.previous, r.target))
        .collect()
}

/// Cost of every cell for `actor` arriving with no prior position,
/// in the map's row-major storage order.
pub fn cost_field<S>(
    evaluator: &CostEvaluator,
    map: &GridMap,
    stats: &S,
    actor: ActorId,
) -> Vec<MoveCost>
where
    S: ActorStats + ?Sized,
{
    (0..map.cells.len())
        .into_par_iter()
        .map(|i| evaluator.evaluate(map, stats, actor, CellCoord::INVALID, map.coord_of(i)))
        .collect()
}
