//! Run history storage API.

use crate::types::RunRecord;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// History kept next to the scenario file.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        let runs_dir = scenario_dir.join(".signalflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Run ids are hex digests; anything else could name a path outside
    /// the store.
    fn run_path(&self, run_id: &str) -> ResultsResult<PathBuf> {
        if run_id.is_empty() || !run_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ResultsError::InvalidRunId {
                run_id: run_id.to_string(),
            });
        }
        Ok(self.root_dir.join(format!("{run_id}.json")))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_path(run_id).is_ok_and(|p| p.exists())
    }

    /// Write a record, replacing any earlier record with the same id.
    pub fn save_run(&self, record: &RunRecord) -> ResultsResult<()> {
        let path = self.run_path(&record.run_id)?;
        fs::create_dir_all(&self.root_dir)?;
        let json = serde_json::to_string_pretty(record)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_run(&self, run_id: &str) -> ResultsResult<RunRecord> {
        let path = self.run_path(run_id)?;

        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// All readable records, newest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunRecord>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(run_id) = path.file_stem().and_then(|s| s.to_str())
                && let Ok(record) = self.load_run(run_id)
            {
                runs.push(record);
            }
        }

        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let path = self.run_path(run_id)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
