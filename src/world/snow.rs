use serde::{Deserialize, Serialize};

/// Snow depth bucket for a cell, ordered from bare ground to deep drifts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum SnowCategory {
    #[default]
    None,
    Light,
    Medium,
    Deep,
}

impl SnowCategory {
    pub fn all() -> [SnowCategory; 4] {
        [
            SnowCategory::None,
            SnowCategory::Light,
            SnowCategory::Medium,
            SnowCategory::Deep,
        ]
    }

    /// Medium snow and deeper hide the ground: terrain cost no longer applies.
    pub fn occludes_terrain(self) -> bool {
        self >= SnowCategory::Medium
    }

    pub fn label(self) -> &'static str {
        match self {
            SnowCategory::None => "none",
            SnowCategory::Light => "light",
            SnowCategory::Medium => "medium",
            SnowCategory::Deep => "deep",
        }
    }
}

/// Depth fractions at which each category begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnowDepthThresholds {
    #[serde(default = "default_light")]
    pub light: f32,
    #[serde(default = "default_medium")]
    pub medium: f32,
    #[serde(default = "default_deep")]
    pub deep: f32,
}

fn default_light() -> f32 {
    0.25
}
fn default_medium() -> f32 {
    0.5
}
fn default_deep() -> f32 {
    0.75
}

impl Default for SnowDepthThresholds {
    fn default() -> Self {
        Self {
            light: default_light(),
            medium: default_medium(),
            deep: default_deep(),
        }
    }
}

impl SnowDepthThresholds {
    pub fn classify(&self, depth: f32) -> SnowCategory {
        if depth >= self.deep {
            SnowCategory::Deep
        } else if depth >= self.medium {
            SnowCategory::Medium
        } else if depth >= self.light {
            SnowCategory::Light
        } else {
            SnowCategory::None
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.light > 0.0 && self.light < self.medium && self.medium < self.deep) {
            return Err(format!(
                "snow thresholds must satisfy 0 < light < medium < deep, got {} / {} / {}. \
                 Example: light = 0.25, medium = 0.5, deep = 0.75",
                self.light, self.medium, self.deep
            ));
        }
        Ok(())
    }
}

/// Movement ticks added by each snow category before stat scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnowMovementTicks {
    #[serde(default)]
    pub none: u32,
    #[serde(default = "default_light_ticks")]
    pub light: u32,
    #[serde(default = "default_medium_ticks")]
    pub medium: u32,
    #[serde(default = "default_deep_ticks")]
    pub deep: u32,
}

fn default_light_ticks() -> u32 {
    4
}
fn default_medium_ticks() -> u32 {
    8
}
fn default_deep_ticks() -> u32 {
    12
}

impl Default for SnowMovementTicks {
    fn default() -> Self {
        Self {
            none: 0,
            light: default_light_ticks(),
            medium: default_medium_ticks(),
            deep: default_deep_ticks(),
        }
    }
}

impl SnowMovementTicks {
    pub fn ticks(&self, category: SnowCategory) -> u32 {
        match category {
            SnowCategory::None => self.none,
            SnowCategory::Light => self.light,
            SnowCategory::Medium => self.medium,
            SnowCategory::Deep => self.deep,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();
        if self.none != 0 {
            errors.push(format!(
                "snow_ticks.none must be 0, got {}. Example: none = 0",
                self.none
            ));
        }
        if !(self.none <= self.light && self.light <= self.medium && self.medium <= self.deep) {
            errors.push(format!(
                "snow_ticks must not decrease with depth, got {} / {} / {} / {}. \
                 Example: none = 0, light = 4, medium = 8, deep = 12",
                self.none, self.light, self.medium, self.deep
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_ordered() {
        let all = SnowCategory::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn only_medium_and_deep_occlude_terrain() {
        assert!(!SnowCategory::None.occludes_terrain());
        assert!(!SnowCategory::Light.occludes_terrain());
        assert!(SnowCategory::Medium.occludes_terrain());
        assert!(SnowCategory::Deep.occludes_terrain());
    }

    #[test]
    fn classify_depth_boundaries() {
        let t = SnowDepthThresholds::default();
        assert_eq!(t.classify(0.0), SnowCategory::None);
        assert_eq!(t.classify(0.24), SnowCategory::None);
        assert_eq!(t.classify(0.25), SnowCategory::Light);
        assert_eq!(t.classify(0.5), SnowCategory::Medium);
        assert_eq!(t.classify(0.74), SnowCategory::Medium);
        assert_eq!(t.classify(0.75), SnowCategory::Deep);
        assert_eq!(t.classify(1.0), SnowCategory::Deep);
    }

    #[test]
    fn default_ticks_are_monotonic_and_start_at_zero() {
        let ticks = SnowMovementTicks::default();
        assert_eq!(ticks.ticks(SnowCategory::None), 0);
        let values: Vec<u32> = SnowCategory::all().iter().map(|c| ticks.ticks(*c)).collect();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(ticks.validate().is_ok());
    }

    #[test]
    fn decreasing_ticks_rejected() {
        let ticks = SnowMovementTicks {
            none: 0,
            light: 9,
            medium: 8,
            deep: 12,
        };
        let err = ticks.validate().unwrap_err();
        assert!(err.contains("must not decrease"));
    }

    #[test]
    fn nonzero_none_ticks_rejected() {
        let ticks = SnowMovementTicks {
            none: 1,
            ..SnowMovementTicks::default()
        };
        assert!(ticks.validate().unwrap_err().contains("snow_ticks.none"));
    }

    #[test]
    fn unordered_thresholds_rejected() {
        let t = SnowDepthThresholds {
            light: 0.5,
            medium: 0.4,
            deep: 0.9,
        };
        assert!(t.validate().is_err());
    }
}
