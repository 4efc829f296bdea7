use serde::{Deserialize, Serialize};

use crate::cost::lookup::MapView;
use crate::world::cell::CellCoord;
use crate::world::occupant::OccupantDescriptor;
use crate::world::snow::{SnowCategory, SnowDepthThresholds};
use crate::world::terrain::{MAX_PATH_COST, TerrainDescriptor};

/// Mutable per-cell state as stored in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    /// Index into the map's terrain palette. `None` means no terrain data.
    pub terrain: Option<u16>,
    #[serde(default)]
    pub snow_depth: f32,
    #[serde(default)]
    pub occupants: Vec<OccupantDescriptor>,
}

/// Rectangular grid snapshot. Cells are stored row-major, `z * width + x`.
///
/// Once built, a `GridMap` is only read, so one instance can back any number
/// of concurrent evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    pub width: u32,
    pub height: u32,
    pub terrain_palette: Vec<TerrainDescriptor>,
    #[serde(default)]
    pub snow_thresholds: SnowDepthThresholds,
    pub cells: Vec<CellState>,
}

impl GridMap {
    /// Create a map covered entirely by `ground`, without snow or occupants.
    pub fn new(width: u32, height: u32, ground: TerrainDescriptor) -> Self {
        let cells = (0..width * height)
            .map(|_| CellState {
                terrain: Some(0),
                snow_depth: 0.0,
                occupants: Vec::new(),
            })
            .collect();
        Self {
            width,
            height,
            terrain_palette: vec![ground],
            snow_thresholds: SnowDepthThresholds::default(),
            cells,
        }
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.is_valid()
            && cell.x >= 0
            && cell.z >= 0
            && (cell.x as u32) < self.width
            && (cell.z as u32) < self.height
    }

    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.z as usize * self.width as usize + cell.x as usize)
        } else {
            None
        }
    }

    pub fn coord_of(&self, index: usize) -> CellCoord {
        let w = self.width as usize;
        CellCoord::new((index % w) as i32, (index / w) as i32)
    }

    pub fn cell(&self, cell: CellCoord) -> Option<&CellState> {
        self.index_of(cell).and_then(|i| self.cells.get(i))
    }

    pub fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut CellState> {
        let i = self.index_of(cell)?;
        self.cells.get_mut(i)
    }

    /// Every in-bounds coordinate in storage order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.cells.len()).map(|i| self.coord_of(i))
    }

    /// In-bounds neighbors of `cell`.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        cell.neighbors().filter(|n| self.contains(*n))
    }

    /// Palette index for `terrain`, adding it if no entry has the same name.
    pub fn palette_index(&mut self, terrain: &TerrainDescriptor) -> u16 {
        if let Some(i) = self
            .terrain_palette
            .iter()
            .position(|t| t.name == terrain.name)
        {
            return i as u16;
        }
        self.terrain_palette.push(terrain.clone());
        (self.terrain_palette.len() - 1) as u16
    }

    pub fn set_terrain(&mut self, cell: CellCoord, terrain: &TerrainDescriptor) {
        if !self.contains(cell) {
            return;
        }
        let idx = self.palette_index(terrain);
        if let Some(state) = self.cell_mut(cell) {
            state.terrain = Some(idx);
        }
    }

    pub fn clear_terrain(&mut self, cell: CellCoord) {
        if let Some(state) = self.cell_mut(cell) {
            state.terrain = None;
        }
    }

    pub fn set_snow_depth(&mut self, cell: CellCoord, depth: f32) {
        if let Some(state) = self.cell_mut(cell) {
            state.snow_depth = depth.clamp(0.0, 1.0);
        }
    }

    pub fn add_occupant(&mut self, cell: CellCoord, occupant: OccupantDescriptor) {
        if let Some(state) = self.cell_mut(cell) {
            state.occupants.push(occupant);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.width == 0 || self.height == 0 {
            errors.push(format!(
                "map dimensions must be > 0, got {}x{}",
                self.width, self.height
            ));
        }

        let expected = self.width as usize * self.height as usize;
        if self.cells.len() != expected {
            errors.push(format!(
                "map has {} cells, expected {} ({}x{})",
                self.cells.len(),
                expected,
                self.width,
                self.height
            ));
        }

        for terrain in &self.terrain_palette {
            if terrain.path_cost > MAX_PATH_COST {
                errors.push(format!(
                    "terrain '{}' path_cost must be <= {}, got {}",
                    terrain.name, MAX_PATH_COST, terrain.path_cost
                ));
            }
        }

        for (i, cell) in self.cells.iter().enumerate() {
            for o in &cell.occupants {
                if o.path_cost > MAX_PATH_COST {
                    errors.push(format!(
                        "cell {} occupant '{}' path_cost must be <= {}, got {}",
                        self.coord_of(i),
                        o.name,
                        MAX_PATH_COST,
                        o.path_cost
                    ));
                }
            }
            match cell.terrain {
                Some(t) if t as usize >= self.terrain_palette.len() => {
                    errors.push(format!(
                        "cell {} references terrain {} but the palette has {} entries",
                        self.coord_of(i),
                        t,
                        self.terrain_palette.len()
                    ));
                }
                _ => {}
            }
            if !(0.0..=1.0).contains(&cell.snow_depth) {
                errors.push(format!(
                    "cell {} snow_depth must be 0.0-1.0, got {}",
                    self.coord_of(i),
                    cell.snow_depth
                ));
            }
        }

        if let Err(e) = self.snow_thresholds.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }
}

impl MapView for GridMap {
    fn is_valid(&self, cell: CellCoord) -> bool {
        self.contains(cell)
    }

    fn terrain_at(&self, cell: CellCoord) -> Option<&TerrainDescriptor> {
        let idx = self.cell(cell)?.terrain?;
        self.terrain_palette.get(idx as usize)
    }

    fn snow_category_at(&self, cell: CellCoord) -> SnowCategory {
        self.cell(cell)
            .map_or(SnowCategory::None, |c| self.snow_thresholds.classify(c.snow_depth))
    }

    fn occupants_at(&self, cell: CellCoord) -> &[OccupantDescriptor] {
        self.cell(cell).map_or(&[][..], |c| c.occupants.as_slice())
    }
}
