use tracing::{trace, warn};

use crate::cost::MoveCost;
use crate::cost::lookup::{ActorStats, MapView};
use crate::cost::repeat::{contains_repeat_ignorable, is_repeat_ignorable};
use crate::cost::rules::CostRules;
use crate::world::actor::{ActorId, StatId};
use crate::world::cell::CellCoord;

/// A scaled cost this close (relative) to an integer is that integer, so
/// `10 * (1.0 - 0.7)` counts as 3 rather than 3.0000000000000004.
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Computes the cost of entering a grid cell, taking snow, ice and the
/// actor's penalty-reduction stats into account.
///
/// The evaluator holds only its rules; all world data is passed in on each
/// call, and nothing is cached between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostEvaluator {
    rules: CostRules,
}

impl CostEvaluator {
    pub fn new(rules: CostRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CostRules {
        &self.rules
    }

    /// Cost for `actor` to enter `target` when coming from `previous`.
    ///
    /// `previous` may be [`CellCoord::INVALID`] when the actor has no prior
    /// position; door and repeat rules then never apply.
    pub fn evaluate<M, S>(
        &self,
        map: &M,
        stats: &S,
        actor: ActorId,
        previous: CellCoord,
        target: CellCoord,
    ) -> MoveCost
    where
        M: MapView + ?Sized,
        S: ActorStats + ?Sized,
    {
        let terrain = match map.terrain_at(target) {
            Some(t) if !t.passability.is_impassable() => t,
            _ => return MoveCost::Impassable,
        };

        let terrain_cost = if terrain.is_ice() {
            let reduction = penalty_reduction(stats, actor, StatId::IcePenaltyReduction);
            scale_penalty(terrain.path_cost, reduction)
        } else {
            terrain.path_cost
        };

        let snow = map.snow_category_at(target);
        let snow_cost = match self.rules.snow_ticks.ticks(snow) {
            0 => 0,
            ticks => {
                let reduction = penalty_reduction(stats, actor, StatId::SnowPenaltyReduction);
                scale_penalty(ticks, reduction)
            }
        };

        let mut cost = if snow.occludes_terrain() {
            snow_cost
        } else {
            terrain_cost.max(snow_cost)
        };

        let previous_valid = previous.is_valid() && map.is_valid(previous);
        let min_repeat = self.rules.repeat_ignore_min_cost;
        let mut previous_has_repeater: Option<bool> = None;
        let mut door_transition = false;

        for occupant in map.occupants_at(target) {
            if occupant.passability.is_impassable() {
                return MoveCost::Impassable;
            }

            let suppressed = is_repeat_ignorable(occupant, min_repeat)
                && previous_valid
                && *previous_has_repeater
                    .get_or_insert_with(|| contains_repeat_ignorable(map, previous, min_repeat));
            if !suppressed {
                cost = cost.max(occupant.path_cost);
            }

            if occupant.is_door() && previous_valid && map.has_door(previous) {
                door_transition = true;
            }
        }

        if door_transition {
            trace!(%actor, %previous, %target, "Door-to-door transition");
            cost = cost.saturating_add(self.rules.door_transition_penalty);
        }

        let ceiling = self.rules.impassable_cost.saturating_sub(1);
        if cost > ceiling {
            warn!(
                %actor,
                %target,
                cost,
                ceiling,
                "Passable cost reaches the impassable sentinel, capping"
            );
            cost = ceiling;
        }

        MoveCost::Passable(cost)
    }

    /// [`evaluate`](Self::evaluate) flattened to an integer, with the
    /// configured sentinel standing in for impassable cells.
    pub fn evaluate_ticks<M, S>(
        &self,
        map: &M,
        stats: &S,
        actor: ActorId,
        previous: CellCoord,
        target: CellCoord,
    ) -> u32
    where
        M: MapView + ?Sized,
        S: ActorStats + ?Sized,
    {
        self.evaluate(map, stats, actor, previous, target)
            .ticks(self.rules.impassable_cost)
    }
}

/// Stat lookup clamped into [0, 1]. NaN counts as no reduction.
fn penalty_reduction<S: ActorStats + ?Sized>(stats: &S, actor: ActorId, stat: StatId) -> f64 {
    let raw = stats.stat_value(actor, stat);
    if raw.is_nan() {
        warn!(%actor, ?stat, "Stat value is NaN, treating as 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&raw) {
        warn!(%actor, ?stat, value = raw, "Penalty reduction out of range, clamping");
    }
    widen_stat(raw.clamp(0.0, 1.0))
}

/// Widen through the shortest decimal form of the `f32`, so `0.7_f32` is read
/// as 0.7 rather than 0.699999988079071.
fn widen_stat(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}

/// `ceil(base * (1 - reduction))`, never negative. Any remainder that is not
/// float noise rounds up.
fn scale_penalty(base: u32, reduction: f64) -> u32 {
    let scaled = base as f64 * (1.0 - reduction);
    let nearest = scaled.round();
    let value = if (scaled - nearest).abs() <= INTEGER_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        scaled.ceil()
    };
    value.max(0.0) as u32
}
