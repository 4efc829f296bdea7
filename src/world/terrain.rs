use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Passability {
    #[default]
    Passable,
    Impassable,
}

impl Passability {
    pub fn is_impassable(self) -> bool {
        self == Passability::Impassable
    }
}

/// Largest `path_cost` a valid map may carry for terrain or occupants.
pub const MAX_PATH_COST: u32 = 5_000;

/// Broad terrain class. Only `Ice` changes how the cost is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Soil,
    Floor,
    Sand,
    Mud,
    Marsh,
    Ice,
    Water,
    Rock,
}

/// Static per-cell ground data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDescriptor {
    pub name: String,
    pub path_cost: u32,
    #[serde(default)]
    pub passability: Passability,
    pub kind: TerrainKind,
}

impl TerrainDescriptor {
    pub fn new(name: &str, kind: TerrainKind, path_cost: u32) -> Self {
        Self {
            name: name.to_string(),
            path_cost,
            passability: Passability::Passable,
            kind,
        }
    }

    pub fn impassable(name: &str, kind: TerrainKind) -> Self {
        Self {
            name: name.to_string(),
            path_cost: 0,
            passability: Passability::Impassable,
            kind,
        }
    }

    pub fn is_ice(&self) -> bool {
        self.kind == TerrainKind::Ice
    }
}

/// Built-in terrain set used by generated scenarios.
pub fn terrain_catalog() -> Vec<TerrainDescriptor> {
    vec![
        TerrainDescriptor::new("soil", TerrainKind::Soil, 2),
        TerrainDescriptor::new("gravel", TerrainKind::Soil, 2),
        TerrainDescriptor::new("grass", TerrainKind::Soil, 4),
        TerrainDescriptor::new("wood_floor", TerrainKind::Floor, 0),
        TerrainDescriptor::new("sand", TerrainKind::Sand, 6),
        TerrainDescriptor::new("mud", TerrainKind::Mud, 12),
        TerrainDescriptor::new("marsh", TerrainKind::Marsh, 14),
        TerrainDescriptor::new("ice", TerrainKind::Ice, 10),
        TerrainDescriptor::new("shallow_water", TerrainKind::Water, 30),
        TerrainDescriptor::impassable("deep_water", TerrainKind::Water),
        TerrainDescriptor::impassable("bedrock", TerrainKind::Rock),
    ]
}

pub fn builtin_terrain(name: &str) -> Option<TerrainDescriptor> {
    terrain_catalog().into_iter().find(|t| t.name == name)
}
