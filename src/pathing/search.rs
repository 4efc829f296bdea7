use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::lookup::MapView;
use crate::cost::{MoveCost, MoveCostSource};
use crate::world::cell::CellCoord;
use crate::world::grid::GridMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Give up after this many node expansions.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
    /// Allow diagonal steps that squeeze past an impassable corner.
    #[serde(default)]
    pub allow_corner_cutting: bool,
}

fn default_max_expansions() -> usize {
    100_000
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            max_expansions: default_max_expansions(),
            allow_corner_cutting: false,
        }
    }
}

/// A found path, start and goal included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub cells: Vec<CellCoord>,
    pub total_ticks: u64,
}

impl Route {
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    estimate: u64,
    ticks: u64,
    cell: CellCoord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; ties broken on coordinates for determinism.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| self.ticks.cmp(&other.ticks))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether nothing at all can stand in `cell`.
pub fn blocks_movement<M: MapView + ?Sized>(map: &M, cell: CellCoord) -> bool {
    match map.terrain_at(cell) {
        None => true,
        Some(t) if t.passability.is_impassable() => true,
        Some(_) => map
            .occupants_at(cell)
            .iter()
            .any(|o| o.passability.is_impassable()),
    }
}

fn cuts_corner(map: &GridMap, from: CellCoord, to: CellCoord) -> bool {
    from.is_diagonal_to(to)
        && (blocks_movement(map, CellCoord::new(to.x, from.z))
            || blocks_movement(map, CellCoord::new(from.x, to.z)))
}

/// A* over 8-way moves, pricing each step through `costs`.
///
/// Every step costs at least one tick, so Chebyshev distance is an
/// admissible heuristic.
pub fn find_route<C>(
    map: &GridMap,
    costs: &C,
    start: CellCoord,
    goal: CellCoord,
    options: &RouteOptions,
) -> Option<Route>
where
    C: MoveCostSource + ?Sized,
{
    if !map.contains(start) || !map.contains(goal) || blocks_movement(map, goal) {
        return None;
    }
    if start == goal {
        return Some(Route {
            cells: vec![start],
            total_ticks: 0,
        });
    }

    let mut open = BinaryHeap::new();
    let mut best: HashMap<CellCoord, u64> = HashMap::new();
    let mut came_from: HashMap<CellCoord, CellCoord> = HashMap::new();
    let mut expansions = 0_usize;

    best.insert(start, 0);
    open.push(OpenNode {
        estimate: start.chebyshev_distance(goal) as u64,
        ticks: 0,
        cell: start,
    });

    while let Some(node) = open.pop() {
        if node.cell == goal {
            debug!(%start, %goal, ticks = node.ticks, expansions, "Route found");
            return Some(Route {
                cells: rebuild(&came_from, start, goal),
                total_ticks: node.ticks,
            });
        }
        if best.get(&node.cell).is_some_and(|&b| node.ticks > b) {
            continue;
        }

        expansions += 1;
        if expansions > options.max_expansions {
            debug!(%start, %goal, expansions, "Route search exhausted expansion budget");
            return None;
        }

        for next in map.neighbors(node.cell) {
            if !options.allow_corner_cutting && cuts_corner(map, node.cell, next) {
                continue;
            }
            let step = match costs.move_cost(node.cell, next) {
                MoveCost::Passable(t) => t.max(1) as u64,
                MoveCost::Impassable => continue,
            };
            let ticks = node.ticks + step;
            if best.get(&next).is_some_and(|&b| ticks >= b) {
                continue;
            }
            best.insert(next, ticks);
            came_from.insert(next, node.cell);
            open.push(OpenNode {
                estimate: ticks + next.chebyshev_distance(goal) as u64,
                ticks,
                cell: next,
            });
        }
    }

    debug!(%start, %goal, expansions, "No route");
    None
}

fn rebuild(came_from: &HashMap<CellCoord, CellCoord>, start: CellCoord, goal: CellCoord) -> Vec<CellCoord> {
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                cells.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}
