use serde::{Deserialize, Serialize};

use crate::world::snow::{SnowCategory, SnowMovementTicks};
use crate::world::terrain::MAX_PATH_COST;

/// Constants driving the cell cost computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRules {
    /// Reported in place of a cost when a cell cannot be entered.
    #[serde(default = "default_impassable_cost")]
    pub impassable_cost: u32,
    /// Added when stepping from one door straight into another.
    #[serde(default = "default_door_transition_penalty")]
    pub door_transition_penalty: u32,
    /// Minimum occupant cost for the ignore-if-repeated rule to apply.
    #[serde(default = "default_repeat_ignore_min_cost")]
    pub repeat_ignore_min_cost: u32,
    #[serde(default)]
    pub snow_ticks: SnowMovementTicks,
    /// Upper bound on ticks for a single step.
    #[serde(default = "default_max_move_ticks")]
    pub max_move_ticks: u32,
}

fn default_impassable_cost() -> u32 {
    10_000
}
fn default_door_transition_penalty() -> u32 {
    45
}
fn default_repeat_ignore_min_cost() -> u32 {
    25
}
fn default_max_move_ticks() -> u32 {
    450
}

impl Default for CostRules {
    fn default() -> Self {
        Self {
            impassable_cost: default_impassable_cost(),
            door_transition_penalty: default_door_transition_penalty(),
            repeat_ignore_min_cost: default_repeat_ignore_min_cost(),
            snow_ticks: SnowMovementTicks::default(),
            max_move_ticks: default_max_move_ticks(),
        }
    }
}

impl CostRules {
    /// Highest cost a valid map can produce: the worst of deep snow and the
    /// path cost cap, plus the door penalty. `None` on overflow.
    pub fn max_passable_cost(&self) -> Option<u32> {
        self.snow_ticks
            .ticks(SnowCategory::Deep)
            .max(MAX_PATH_COST)
            .checked_add(self.door_transition_penalty)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if let Err(e) = self.snow_ticks.validate() {
            errors.push(e);
        }

        match self.max_passable_cost() {
            Some(worst) if self.impassable_cost > worst => {}
            Some(worst) => errors.push(format!(
                "impassable_cost must exceed the largest passable cost ({}), got {}. \
                 Example: impassable_cost = 10000",
                worst, self.impassable_cost
            )),
            None => errors.push(format!(
                "door_transition_penalty {} overflows when added to the largest surface cost. \
                 Example: door_transition_penalty = 45",
                self.door_transition_penalty
            )),
        }

        if self.max_move_ticks == 0 || self.max_move_ticks >= self.impassable_cost {
            errors.push(format!(
                "max_move_ticks must be in 1..{}, got {}. Example: max_move_ticks = 450",
                self.impassable_cost, self.max_move_ticks
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
    fn defaults_are_valid() {
        let rules = CostRules::default();
        assert_eq!(rules.impassable_cost, 10_000);
        assert_eq!(rules.door_transition_penalty, 45);
        assert_eq!(rules.repeat_ignore_min_cost, 25);
        assert_eq!(rules.max_move_ticks, 450);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn sentinel_must_exceed_reachable_costs() {
        let rules = CostRules {
            impassable_cost: 50,
            ..CostRules::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.contains("impassable_cost"));
    }

    #[test]
    fn sentinel_must_exceed_path_cost_cap() {
        let rules = CostRules {
            impassable_cost: MAX_PATH_COST + 45,
            ..CostRules::default()
        };
        assert!(rules.validate().unwrap_err().contains("impassable_cost"));
        let rules = CostRules {
            impassable_cost: MAX_PATH_COST + 46,
            ..CostRules::default()
        };
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn huge_door_penalty_reports_overflow() {
        let rules = CostRules {
            door_transition_penalty: u32::MAX - 5,
            ..CostRules::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.contains("overflows"));
    }

    #[test]
    fn zero_max_move_ticks_rejected() {
        let rules = CostRules {
            max_move_ticks: 0,
            ..CostRules::default()
        };
        assert!(rules.validate().unwrap_err().contains("max_move_ticks"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let rules: CostRules = toml::from_str("door_transition_penalty = 30").unwrap();
        assert_eq!(rules.door_transition_penalty, 30);
        assert_eq!(rules.impassable_cost, 10_000);
        assert_eq!(rules.snow_ticks, SnowMovementTicks::default());
    }
}
