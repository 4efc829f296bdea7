use serde::Deserialize;
use std::path::Path;

use crate::cost::rules::CostRules;
use crate::pathing::search::RouteOptions;

/// Top-level configuration file for the evaluator and the route harness.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub rules: CostRules,
    #[serde(default)]
    pub route: RouteOptions,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            rules: CostRules::default(),
            route: RouteOptions::default(),
        }
    }
}

impl CostConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, String> {
        let config: CostConfig =
            toml::from_str(content).map_err(|e| format!("{}: {}", source_path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if let Err(e) = self.rules.validate() {
            errors.push(e);
        }

        if self.route.max_expansions == 0 {
            errors.push(format!(
                "route.max_expansions must be > 0, got {}. Example: max_expansions = 100000",
                self.route.max_expansions
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of {:?}, got '{}'. Example: log_level = \"info\"",
                valid_levels, self.log_level
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
    use crate::world::snow::SnowMovementTicks;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn test_path() -> PathBuf {
        PathBuf::from("test-snowshoes.toml")
    }

    #[test]
    fn valid_config_loads_all_fields() {
        let toml = r#"
            log_level = "debug"

            [rules]
            impassable_cost = 20000
            door_transition_penalty = 30
            repeat_ignore_min_cost = 20
            max_move_ticks = 300

            [rules.snow_ticks]
            none = 0
            light = 3
            medium = 9
            deep = 15

            [route]
            max_expansions = 500
            allow_corner_cutting = true
        "#;
        let config = CostConfig::from_toml_str(toml, &test_path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.rules.impassable_cost, 20000);
        assert_eq!(config.rules.door_transition_penalty, 30);
        assert_eq!(config.rules.repeat_ignore_min_cost, 20);
        assert_eq!(config.rules.max_move_ticks, 300);
        assert_eq!(
            config.rules.snow_ticks,
            SnowMovementTicks {
                none: 0,
                light: 3,
                medium: 9,
                deep: 15
            }
        );
        assert_eq!(config.route.max_expansions, 500);
        assert!(config.route.allow_corner_cutting);
    }

    #[test]
    fn defaults_applied_for_empty_config() {
        let config = CostConfig::from_toml_str("", &test_path()).unwrap();
        assert_eq!(config, CostConfig::default());
        assert_eq!(config.rules.impassable_cost, 10_000);
        assert_eq!(config.rules.door_transition_penalty, 45);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn invalid_log_level_rejected() {
        let err =
            CostConfig::from_toml_str(r#"log_level = "verbose""#, &test_path()).unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn non_monotonic_snow_rejected() {
        let toml = "[rules.snow_ticks]\nlight = 10\nmedium = 5";
        let err = CostConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert!(err.contains("snow_ticks"));
    }

    #[test]
    fn multiple_errors_reported_together() {
        let toml = "log_level = \"loud\"\n[rules]\nimpassable_cost = 1\n[route]\nmax_expansions = 0";
        let err = CostConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert!(err.contains("log_level"));
        assert!(err.contains("impassable_cost"));
        assert!(err.contains("max_expansions"));
    }

    #[test]
    fn malformed_toml_includes_source_path() {
        let err = CostConfig::from_toml_str("log_level = [oops", &test_path()).unwrap_err();
        assert!(err.contains("test-snowshoes.toml"));
    }

    #[test]
    fn from_file_loads_valid_config() {
        let mut tmp = NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(tmp, "[rules]\ndoor_transition_penalty = 60").unwrap();
        let config = CostConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.rules.door_transition_penalty, 60);
    }

    #[test]
    fn from_file_missing_file_error() {
        let err = CostConfig::from_file(Path::new("/nonexistent/snowshoes.toml")).unwrap_err();
        assert!(err.contains("Cannot read"));
    }
}
