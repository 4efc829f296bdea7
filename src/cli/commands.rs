use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::cost::CostConfig;
use crate::config::generation::ScenarioParams;
use crate::cost::batch::cost_field;
use crate::cost::lookup::MapView;
use crate::cost::{ActorCostView, CostEvaluator, MoveCost};
use crate::pathing::{compute_route_statistics, find_route};
use crate::persistence;
use crate::world::generation::{generate_scenario, print_scenario_summary};
use crate::world::{ActorId, CellCoord, Scenario};

/// Parse a `x,z` pair from the command line.
pub fn parse_cell(s: &str) -> Result<CellCoord, String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z but got '{}'", s))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad x in '{}': {}", s, e))?;
    let z = z
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad z in '{}': {}", s, e))?;
    Ok(CellCoord::new(x, z))
}

/// Generate a scenario and write it to `output`.
pub fn generate(params_path: Option<&str>, seed: Option<u64>, output: &str) -> Result<(), String> {
    let mut params = match params_path {
        Some(p) => ScenarioParams::from_file(Path::new(p))?,
        None => ScenarioParams::default(),
    };
    if let Some(seed) = seed {
        params.seed = seed;
    }
    params.validate()?;

    let scenario = generate_scenario(&params);
    print_scenario_summary(&scenario);

    let path = persistence::save_scenario(&scenario, Path::new(output))
        .map_err(|e| format!("Cannot save scenario: {}", e))?;
    info!(path = %path.display(), "Scenario saved");
    println!("\nScenario saved to {}", path.display());
    Ok(())
}

#[derive(Debug, Serialize)]
struct EvalReport {
    actor: ActorId,
    previous: CellCoord,
    target: CellCoord,
    cell_cost: MoveCost,
    cell_cost_ticks: u32,
    move_ticks: Option<MoveCost>,
}

/// Evaluate a single cell entry and print the result.
pub fn eval(
    config: &CostConfig,
    scenario_path: &str,
    actor: u32,
    from: Option<CellCoord>,
    to: CellCoord,
    json: bool,
) -> Result<(), String> {
    let scenario = load(scenario_path)?;
    let evaluator = CostEvaluator::new(config.rules.clone());
    let actor = ActorId(actor);
    let previous = from.unwrap_or(CellCoord::INVALID);

    if !scenario.map.contains(to) {
        return Err(format!(
            "Cell {} is outside the {}x{} map",
            to, scenario.map.width, scenario.map.height
        ));
    }
    if previous.is_valid() && !previous.is_adjacent_to(to) {
        return Err(format!("{} is not adjacent to {}", previous, to));
    }

    let view = ActorCostView::new(&evaluator, &scenario.map, &scenario.actors, actor);
    let cell_cost = view.cell_cost(previous, to);
    let move_ticks = previous
        .is_valid()
        .then(|| evaluator.ticks_to_move(&scenario.map, &scenario.actors, actor, previous, to));

    let report = EvalReport {
        actor,
        previous,
        target: to,
        cell_cost,
        cell_cost_ticks: cell_cost.ticks(config.rules.impassable_cost),
        move_ticks,
    };

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", out);
    } else {
        println!("Actor:      {}", report.actor);
        println!("From:       {}", report.previous);
        println!("To:         {}", report.target);
        println!("Cell cost:  {} ({})", report.cell_cost, report.cell_cost_ticks);
        if let Some(t) = report.move_ticks {
            println!("Move ticks: {}", t);
        }
    }
    Ok(())
}

/// Find a route between two cells and print it with statistics.
pub fn route(
    config: &CostConfig,
    scenario_path: &str,
    actor: u32,
    from: CellCoord,
    to: CellCoord,
    json: bool,
) -> Result<(), String> {
    let scenario = load(scenario_path)?;
    let evaluator = CostEvaluator::new(config.rules.clone());
    let actor = ActorId(actor);
    let view = ActorCostView::new(&evaluator, &scenario.map, &scenario.actors, actor);

    let route = find_route(&scenario.map, &view, from, to, &config.route)
        .ok_or_else(|| format!("No route from {} to {} for {}", from, to, actor))?;
    let stats = compute_route_statistics(&scenario.map, &route);

    if json {
        #[derive(Serialize)]
        struct RouteReport<'a> {
            actor: ActorId,
            route: &'a crate::pathing::Route,
            statistics: &'a crate::pathing::RouteStatistics,
        }
        let out = serde_json::to_string_pretty(&RouteReport {
            actor,
            route: &route,
            statistics: &stats,
        })
        .map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    println!("=== Route for {} ===", actor);
    println!("From {} to {}: {} steps, {} ticks", from, to, stats.steps, stats.total_ticks);
    println!("Average ticks per step: {:.1}", stats.avg_ticks_per_step);
    println!("Ice cells: {}", stats.ice_cells);
    println!("Door transitions: {}", stats.door_transitions);
    println!("Snow exposure:");
    for category in crate::world::SnowCategory::all() {
        let n = stats.snow_cells.get(&category).copied().unwrap_or(0);
        println!("  {:<8} {:>5}", category.label(), n);
    }
    let path: Vec<String> = route.cells.iter().map(|c| c.to_string()).collect();
    println!("Path: {}", path.join(" -> "));
    Ok(())
}

/// Inspect a single cell, or the whole scenario when no cell is given.
pub fn inspect(config: &CostConfig, scenario_path: &str, cell: Option<CellCoord>) -> Result<(), String> {
    let scenario = load(scenario_path)?;
    match cell {
        Some(c) => inspect_cell(config, &scenario, c),
        None => {
            print_scenario_summary(&scenario);
            print_cost_overview(config, &scenario);
            Ok(())
        }
    }
}

fn inspect_cell(config: &CostConfig, scenario: &Scenario, cell: CellCoord) -> Result<(), String> {
    let map = &scenario.map;
    let state = map.cell(cell).ok_or_else(|| {
        format!("Cell {} not found (map is {}x{})", cell, map.width, map.height)
    })?;

    println!("=== Cell {} ===", cell);
    match map.terrain_at(cell) {
        Some(t) => println!(
            "Terrain: {} ({:?}, cost {}, {:?})",
            t.name, t.kind, t.path_cost, t.passability
        ),
        None => println!("Terrain: (none)"),
    }
    println!(
        "Snow: {:.3} ({})",
        state.snow_depth,
        map.snow_category_at(cell).label()
    );
    println!("Occupants:");
    if state.occupants.is_empty() {
        println!("  (none)");
    }
    for o in &state.occupants {
        println!(
            "  {} ({:?}, cost {}, {:?}{})",
            o.name,
            o.kind,
            o.path_cost,
            o.passability,
            if o.ignore_repeat { ", ignore-repeat" } else { "" }
        );
    }

    let evaluator = CostEvaluator::new(config.rules.clone());
    println!("\nCost on arrival (no prior position):");
    for actor in scenario.actors.profiles() {
        let cost = evaluator.evaluate(map, &scenario.actors, actor.id, CellCoord::INVALID, cell);
        println!("  {:<12} {}", actor.name, cost);
    }
    Ok(())
}

fn print_cost_overview(config: &CostConfig, scenario: &Scenario) {
    let evaluator = CostEvaluator::new(config.rules.clone());
    println!("\nMean passable cell cost:");
    for actor in scenario.actors.profiles() {
        let field = cost_field(&evaluator, &scenario.map, &scenario.actors, actor.id);
        let passable: Vec<u32> = field.iter().filter_map(|c| c.passable()).collect();
        let mean = if passable.is_empty() {
            0.0
        } else {
            passable.iter().map(|&c| c as f64).sum::<f64>() / passable.len() as f64
        };
        println!(
            "  {:<12} {:>6.2} ({} impassable)",
            actor.name,
            mean,
            field.len() - passable.len()
        );
    }
}

fn load(path: &str) -> Result<Scenario, String> {
    let scenario = persistence::load_scenario(Path::new(path))
        .map_err(|e| format!("Failed to load scenario: {}", e))?;
    info!(
        name = %scenario.name,
        width = scenario.map.width,
        height = scenario.map.height,
        actors = scenario.actors.len(),
        "Scenario loaded"
    );
    Ok(scenario)
}
