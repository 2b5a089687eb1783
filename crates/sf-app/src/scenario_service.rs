//! Scenario loading, saving and conversion to engine lanes.

use std::path::Path;

use sf_core::Lane;
use sf_project::Scenario;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Load and validate a scenario file (YAML or JSON by extension).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    let scenario = sf_project::load(path)?;
    info!(
        path = %path.display(),
        name = %scenario.name,
        lanes = scenario.lanes.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    sf_project::save(path, scenario)?;
    Ok(())
}

/// Write the built-in five-lane scenario.
pub fn write_default_scenario(path: &Path) -> AppResult<Scenario> {
    let scenario = sf_project::default_scenario();
    save_scenario(path, &scenario)?;
    Ok(scenario)
}

/// Engine lanes for a validated scenario.
pub fn scenario_lanes(scenario: &Scenario) -> AppResult<Vec<Lane>> {
    sf_project::validate_scenario(scenario)?;
    Ok(scenario.lanes()?)
}
