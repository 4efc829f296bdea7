use std::collections::HashMap;

use serde::Serialize;

use crate::cost::lookup::MapView;
use crate::pathing::search::Route;
use crate::world::snow::SnowCategory;

/// Aggregate terrain and snow exposure along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStatistics {
    pub steps: usize,
    pub total_ticks: u64,
    pub avg_ticks_per_step: f32,
    /// Cells entered, by snow category. The start cell is not counted.
    pub snow_cells: HashMap<SnowCategory, u32>,
    pub ice_cells: u32,
    pub door_transitions: u32,
}

pub fn compute_route_statistics<M: MapView + ?Sized>(map: &M, route: &Route) -> RouteStatistics {
    let steps = route.steps();
    let mut snow_cells: HashMap<SnowCategory, u32> = HashMap::new();
    let mut ice_cells = 0;
    let mut door_transitions = 0;

    for pair in route.cells.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        *snow_cells.entry(map.snow_category_at(to)).or_insert(0) += 1;
        if map.terrain_at(to).is_some_and(|t| t.is_ice()) {
            ice_cells += 1;
        }
        let door_here = map.occupants_at(to).iter().any(|o| o.is_door());
        let door_before = map.has_door(from);
        if door_here && door_before {
            door_transitions += 1;
        }
    }

    let avg_ticks_per_step = if steps == 0 {
        0.0
    } else {
        (route.total_ticks as f64 / steps as f64) as f32
    };

    RouteStatistics {
        steps,
        total_ticks: route.total_ticks,
        avg_ticks_per_step,
        snow_cells,
        ice_cells,
        door_transitions,
    }
}
