use std::collections::HashMap;

use noise::{NoiseFn, Perlin};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::generation::ScenarioParams;
use crate::cost::lookup::MapView;
use crate::world::Scenario;
use crate::world::actor::{ActorProfile, ActorRoster, Equipment};
use crate::world::cell::CellCoord;
use crate::world::grid::GridMap;
use crate::world::occupant::builtin_occupant;
use crate::world::snow::SnowCategory;
use crate::world::terrain::{TerrainDescriptor, TerrainKind, builtin_terrain};

const HUT_SIZE: i32 = 5;
const HUT_PLACEMENT_ATTEMPTS: u32 = 64;

/// Generate a new winter scenario from the given parameters.
///
/// If `params.seed` is 0, a random seed is chosen. The actual seed used
/// is stored in the returned scenario's `params` for reproducibility.
pub fn generate_scenario(params: &ScenarioParams) -> Scenario {
    let seed = if params.seed == 0 {
        rand::thread_rng().r#gen()
    } else {
        params.seed
    };
    let resolved_params = ScenarioParams {
        seed,
        ..params.clone()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut map = GridMap::new(params.width, params.height, catalog("grass"));

    assign_ground(&mut map, seed as u32, params.ice_ratio, params.water_ratio);
    assign_snow(
        &mut map,
        seed.wrapping_add(1) as u32,
        params.snowfall,
        params.snow_roughness,
    );
    let huts = place_huts(&mut map, &mut rng, params.hut_count);
    scatter_occupants(&mut map, &mut rng, params.rubble_density, params.tree_density);

    Scenario {
        name: format!("Winter-{}", seed),
        created_at: format!(
            "{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        ),
        params: Some(resolved_params),
        huts,
        map,
        actors: default_roster(),
    }
}

/// One actor per kind of footwear.
pub fn default_roster() -> ActorRoster {
    ActorRoster::from_profiles([
        ActorProfile::new(1, "Barefoot"),
        ActorProfile::new(2, "Snowshoes").wearing(Equipment::snowshoes()),
        ActorProfile::new(3, "Cleats").wearing(Equipment::ice_cleats()),
    ])
}

/// Print a summary of the generated scenario.
pub fn print_scenario_summary(scenario: &Scenario) {
    let map = &scenario.map;
    let total = map.cells.len().max(1) as f32;

    println!("=== Scenario Summary ===");
    println!("Name: {}", scenario.name);
    println!("Size: {}x{} ({} cells)", map.width, map.height, map.cells.len());
    if let Some(params) = &scenario.params {
        println!("Seed: {}", params.seed);
    }
    println!("Huts: {}", scenario.huts.len());

    let mut terrain_counts: HashMap<&str, u32> = HashMap::new();
    for c in map.coords() {
        let name = map.terrain_at(c).map_or("(none)", |t| t.name.as_str());
        *terrain_counts.entry(name).or_insert(0) += 1;
    }
    let mut terrain_sorted: Vec<_> = terrain_counts.into_iter().collect();
    terrain_sorted.sort_by_key(|&(name, _)| name);
    println!("\nTerrain:");
    for (name, count) in &terrain_sorted {
        println!("  {:<14} {:>5} ({:.1}%)", name, count, *count as f32 / total * 100.0);
    }

    println!("\nSnow:");
    for category in SnowCategory::all() {
        let count = map
            .coords()
            .filter(|c| map.snow_category_at(*c) == category)
            .count();
        println!(
            "  {:<14} {:>5} ({:.1}%)",
            category.label(),
            count,
            count as f32 / total * 100.0
        );
    }

    let mut occupant_counts: HashMap<&str, u32> = HashMap::new();
    for cell in &map.cells {
        for o in &cell.occupants {
            *occupant_counts.entry(o.name.as_str()).or_insert(0) += 1;
        }
    }
    if !occupant_counts.is_empty() {
        let mut occupant_sorted: Vec<_> = occupant_counts.into_iter().collect();
        occupant_sorted.sort_by_key(|&(name, _)| name);
        println!("\nOccupants:");
        for (name, count) in &occupant_sorted {
            println!("  {:<14} {:>5}", name, count);
        }
    }

    println!("\nActors:");
    for actor in scenario.actors.profiles() {
        let gear: Vec<&str> = actor.equipment.iter().map(|e| e.name.as_str()).collect();
        println!("  {:<4} {:<12} {}", actor.id.0, actor.name, gear.join(", "));
    }
}

// --- Internal generation functions ---

fn catalog(name: &str) -> TerrainDescriptor {
    builtin_terrain(name).unwrap_or_else(|| TerrainDescriptor::new(name, TerrainKind::Soil, 2))
}

fn assign_ground(map: &mut GridMap, seed: u32, ice_ratio: f32, water_ratio: f32) {
    let wetness = Perlin::new(seed);
    let texture = Perlin::new(seed.wrapping_add(7));
    let scale = 0.09;

    let coords: Vec<CellCoord> = map.coords().collect();
    let wet: Vec<f64> = coords
        .iter()
        .map(|c| wetness.get([c.x as f64 * scale, c.z as f64 * scale]))
        .collect();

    // Wettest cells become water, the next band ice, by percentile.
    let mut indices: Vec<usize> = (0..coords.len()).collect();
    indices.sort_by(|&a, &b| wet[b].total_cmp(&wet[a]));

    let water_count = (coords.len() as f32 * water_ratio) as usize;
    let ice_count = (coords.len() as f32 * ice_ratio) as usize;
    let deep_count = water_count / 3;

    let deep_water = catalog("deep_water");
    let shallow_water = catalog("shallow_water");
    let ice = catalog("ice");

    for (rank, &i) in indices.iter().enumerate() {
        let c = coords[i];
        let terrain = if rank < deep_count {
            deep_water.clone()
        } else if rank < water_count {
            shallow_water.clone()
        } else if rank < water_count + ice_count {
            ice.clone()
        } else {
            let n = texture.get([c.x as f64 * scale * 1.7, c.z as f64 * scale * 1.7]);
            let name = if n < -0.45 {
                "mud"
            } else if n < -0.15 {
                "soil"
            } else if n < 0.25 {
                "grass"
            } else if n < 0.5 {
                "gravel"
            } else {
                "sand"
            };
            catalog(name)
        };
        map.set_terrain(c, &terrain);
    }
}

fn assign_snow(map: &mut GridMap, seed: u32, snowfall: f32, roughness: f32) {
    let drift = Perlin::new(seed);
    let scale = 0.12;
    let coords: Vec<CellCoord> = map.coords().collect();
    for c in coords {
        let on_water = map
            .terrain_at(c)
            .is_some_and(|t| t.kind == TerrainKind::Water);
        if on_water {
            map.set_snow_depth(c, 0.0);
            continue;
        }
        let n = drift.get([c.x as f64 * scale, c.z as f64 * scale]) as f32;
        map.set_snow_depth(c, (snowfall + n * roughness).clamp(0.0, 1.0));
    }
}

/// Place up to `count` walled huts on dry ground. Returns each hut's door cell.
fn place_huts(map: &mut GridMap, rng: &mut impl Rng, count: u32) -> Vec<CellCoord> {
    let mut doors = Vec::new();
    if map.width < HUT_SIZE as u32 || map.height < HUT_SIZE as u32 {
        return doors;
    }

    let wall = builtin_occupant("wall");
    let door = builtin_occupant("door");
    let floor = catalog("wood_floor");
    let (Some(wall), Some(door)) = (wall, door) else {
        return doors;
    };

    for _ in 0..count {
        for _ in 0..HUT_PLACEMENT_ATTEMPTS {
            let x0 = rng.gen_range(0..=map.width as i32 - HUT_SIZE);
            let z0 = rng.gen_range(0..=map.height as i32 - HUT_SIZE);
            let footprint: Vec<CellCoord> = (0..HUT_SIZE)
                .flat_map(|dz| (0..HUT_SIZE).map(move |dx| CellCoord::new(x0 + dx, z0 + dz)))
                .collect();

            let clear = footprint.iter().all(|c| {
                map.terrain_at(*c).is_some_and(|t| t.kind != TerrainKind::Water)
                    && map.occupants_at(*c).is_empty()
            });
            if !clear {
                continue;
            }

            let mid = HUT_SIZE / 2;
            let door_cell = match rng.gen_range(0..4) {
                0 => CellCoord::new(x0 + mid, z0),
                1 => CellCoord::new(x0 + mid, z0 + HUT_SIZE - 1),
                2 => CellCoord::new(x0, z0 + mid),
                _ => CellCoord::new(x0 + HUT_SIZE - 1, z0 + mid),
            };

            for c in footprint {
                let edge = c.x == x0 || c.z == z0 || c.x == x0 + HUT_SIZE - 1 || c.z == z0 + HUT_SIZE - 1;
                map.set_terrain(c, &floor);
                map.set_snow_depth(c, 0.0);
                if c == door_cell {
                    map.add_occupant(c, door.clone());
                } else if edge {
                    map.add_occupant(c, wall.clone());
                }
            }
            doors.push(door_cell);
            break;
        }
    }
    doors
}

fn scatter_occupants(map: &mut GridMap, rng: &mut impl Rng, rubble_density: f32, tree_density: f32) {
    let debris = ["rubble", "rock_chunk"];
    let plants = ["tree", "bush"];
    let coords: Vec<CellCoord> = map.coords().collect();

    for c in coords {
        let dry_ground = map.terrain_at(c).is_some_and(|t| {
            !matches!(t.kind, TerrainKind::Water | TerrainKind::Floor)
        });
        if !dry_ground || !map.occupants_at(c).is_empty() {
            continue;
        }
        let roll: f32 = rng.r#gen();
        let name = if roll < rubble_density {
            debris[rng.gen_range(0..debris.len())]
        } else if roll < rubble_density + tree_density {
            plants[rng.gen_range(0..plants.len())]
        } else {
            continue;
        };
        if let Some(o) = builtin_occupant(name) {
            map.add_occupant(c, o);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_params() -> ScenarioParams {
        ScenarioParams {
            seed: 42,
            ..ScenarioParams::default()
        }
    }

    #[test]
    fn generated_map_has_requested_size() {
        let s = generate_scenario(&default_params());
        assert_eq!(s.map.width, 48);
        assert_eq!(s.map.height, 32);
        assert_eq!(s.map.cells.len(), 48 * 32);
        assert!(s.map.validate().is_ok());
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_scenario(&default_params());
        let b = generate_scenario(&default_params());
        assert_eq!(a.map, b.map);
        assert_eq!(a.huts, b.huts);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_scenario(&default_params());
        let b = generate_scenario(&ScenarioParams {
            seed: 43,
            ..ScenarioParams::default()
        });
        assert_ne!(a.map, b.map);
    }

    #[test]
    fn water_and_ice_ratios_are_respected() {
        let s = generate_scenario(&default_params());
        let n = s.map.cells.len() as f32;
        let count = |kind: TerrainKind| {
            s.map
                .coords()
                .filter(|c| s.map.terrain_at(*c).is_some_and(|t| t.kind == kind))
                .count() as f32
        };
        // Huts overwrite a few cells with floor, so allow some slack.
        let water = count(TerrainKind::Water) / n;
        let ice = count(TerrainKind::Ice) / n;
        assert!(water <= 0.05 + 1e-3 && water > 0.02, "water ratio {}", water);
        assert!(ice <= 0.08 + 1e-3 && ice > 0.04, "ice ratio {}", ice);
    }

    #[test]
    fn water_carries_no_snow() {
        let s = generate_scenario(&ScenarioParams {
            snowfall: 1.0,
            ..default_params()
        });
        for c in s.map.coords() {
            if s.map.terrain_at(c).is_some_and(|t| t.kind == TerrainKind::Water) {
                assert_eq!(s.map.snow_category_at(c), SnowCategory::None);
            }
        }
    }

    #[test]
    fn huts_have_one_door_and_clear_floor() {
        let s = generate_scenario(&ScenarioParams {
            hut_count: 3,
            water_ratio: 0.0,
            ..default_params()
        });
        assert!(!s.huts.is_empty());
        let doors = s
            .map
            .cells
            .iter()
            .flat_map(|c| c.occupants.iter())
            .filter(|o| o.is_door())
            .count();
        assert_eq!(doors, s.huts.len());
        for door in &s.huts {
            assert!(s.map.has_door(*door));
            assert_eq!(s.map.snow_category_at(*door), SnowCategory::None);
        }
    }

    #[test]
    fn no_snowfall_means_no_snow() {
        let s = generate_scenario(&ScenarioParams {
            snowfall: 0.0,
            snow_roughness: 0.0,
            ..default_params()
        });
        assert!(
            s.map
                .coords()
                .all(|c| s.map.snow_category_at(c) == SnowCategory::None)
        );
    }

    #[test]
    fn default_roster_has_three_footwear_profiles() {
        let s = generate_scenario(&default_params());
        assert_eq!(s.actors.len(), 3);
    }

    #[test]
    fn seed_zero_generates_random() {
        let s = generate_scenario(&ScenarioParams {
            seed: 0,
            ..ScenarioParams::default()
        });
        let resolved = s.params.unwrap();
        assert_ne!(resolved.seed, 0);
    }
}
