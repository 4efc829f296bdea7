use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::world::Scenario;

/// On-disk encodings a scenario can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ScenarioFormat::Json),
            Some("toml") => Some(ScenarioFormat::Toml),
            _ => None,
        }
    }
}

/// Errors that can occur while reading or writing scenario files.
#[derive(Debug)]
pub enum ScenarioError {
    Io(io::Error),
    Serialize(String),
    Deserialize(String),
    Invalid(PathBuf, String),
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "I/O error: {}", e),
            ScenarioError::Serialize(e) => write!(f, "Serialization error: {}", e),
            ScenarioError::Deserialize(e) => write!(f, "Deserialization error: {}", e),
            ScenarioError::Invalid(path, reason) => {
                write!(f, "Invalid scenario {}:\n{}", path.display(), reason)
            }
            ScenarioError::UnsupportedFormat(path) => write!(
                f,
                "Unsupported scenario format: {} (expected .json or .toml)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<io::Error> for ScenarioError {
    fn from(e: io::Error) -> Self {
        ScenarioError::Io(e)
    }
}

/// Save a scenario as pretty-printed JSON using atomic write.
///
/// Writes to a temporary file first, then renames over `path`, so a partial
/// write never corrupts an existing file.
pub fn save_scenario(scenario: &Scenario, path: &Path) -> Result<PathBuf, ScenarioError> {
    if ScenarioFormat::from_path(path) != Some(ScenarioFormat::Json) {
        return Err(ScenarioError::UnsupportedFormat(path.to_path_buf()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let encoded = serde_json::to_string_pretty(scenario)
        .map_err(|e| ScenarioError::Serialize(e.to_string()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("scenario.json");
    let tmp = path.with_file_name(format!(".{}.tmp", filename));

    if let Err(e) = fs::write(&tmp, encoded) {
        let _ = fs::remove_file(&tmp);
        return Err(ScenarioError::Io(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ScenarioError::Io(e));
    }

    Ok(path.to_path_buf())
}

/// Load a scenario from a `.json` or `.toml` file and check its map is consistent.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let format = ScenarioFormat::from_path(path)
        .ok_or_else(|| ScenarioError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path)?;

    let scenario: Scenario = match format {
        ScenarioFormat::Json => serde_json::from_str(&content)
            .map_err(|e| ScenarioError::Deserialize(e.to_string()))?,
        ScenarioFormat::Toml => {
            toml::from_str(&content).map_err(|e| ScenarioError::Deserialize(e.to_string()))?
        }
    };

    scenario
        .map
        .validate()
        .map_err(|reason| ScenarioError::Invalid(path.to_path_buf(), reason))?;

    Ok(scenario)
}
