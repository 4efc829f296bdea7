use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters used to procedurally generate a winter scenario.
/// Stored with the scenario for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// 0 picks a random seed.
    #[serde(default)]
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// Mean snow depth, 0.0-1.0.
    pub snowfall: f32,
    /// Amplitude of snow drift variation around the mean.
    #[serde(default = "default_snow_roughness")]
    pub snow_roughness: f32,
    #[serde(default)]
    pub ice_ratio: f32,
    #[serde(default)]
    pub water_ratio: f32,
    #[serde(default)]
    pub rubble_density: f32,
    #[serde(default)]
    pub tree_density: f32,
    /// Small walled huts with a door on one side.
    #[serde(default)]
    pub hut_count: u32,
}

fn default_snow_roughness() -> f32 {
    0.3
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 48,
            height: 32,
            snowfall: 0.4,
            snow_roughness: default_snow_roughness(),
            ice_ratio: 0.08,
            water_ratio: 0.05,
            rubble_density: 0.03,
            tree_density: 0.05,
            hut_count: 2,
        }
    }
}

impl ScenarioParams {
    /// Load scenario parameters from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let params: Self = toml::from_str(&content)
            .map_err(|e| format!("Invalid TOML in {}: {}", path.display(), e))?;
        params.validate()?;
        Ok(params)
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(4..=1024).contains(&self.width) || !(4..=1024).contains(&self.height) {
            return Err(format!(
                "width and height must be 4-1024, got {}x{}",
                self.width, self.height
            ));
        }
        let unit_ranges = [
            ("snowfall", self.snowfall),
            ("snow_roughness", self.snow_roughness),
            ("ice_ratio", self.ice_ratio),
            ("water_ratio", self.water_ratio),
            ("rubble_density", self.rubble_density),
            ("tree_density", self.tree_density),
        ];
        for (name, value) in unit_ranges {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be 0.0-1.0, got {}", name, value));
            }
        }
        if self.ice_ratio + self.water_ratio > 0.8 {
            return Err(format!(
                "ice_ratio + water_ratio must be <= 0.8, got {}",
                self.ice_ratio + self.water_ratio
            ));
        }
        let hut_area = self.hut_count as u64 * 25;
        let map_area = self.width as u64 * self.height as u64;
        if hut_area * 4 > map_area {
            return Err(format!(
                "hut_count {} does not fit a {}x{} map",
                self.hut_count, self.width, self.height
            ));
        }
        Ok(())
    }
}
