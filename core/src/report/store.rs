use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::BenchError;
use crate::runner::CommandResult;

use super::types::Report;

/// Durable mapping of command identity to per-version durations (ms).
///
/// Insertion order is kept so rows and columns render in the order they were
/// first written. Cells written by other tools or older runs are carried
/// through untouched, including fractional or negative values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedReport {
    commands: IndexMap<String, IndexMap<String, Number>>,
}

impl PersistedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn commands(&self) -> &IndexMap<String, IndexMap<String, Number>> {
        &self.commands
    }

    pub fn get(&self, identity: &str, version: &str) -> Option<f64> {
        self.commands.get(identity)?.get(version)?.as_f64()
    }

    pub fn set(&mut self, identity: &str, version: &str, duration_ms: u64) {
        self.commands
            .entry(identity.to_string())
            .or_default()
            .insert(version.to_string(), Number::from(duration_ms));
    }

    /// Writes every result under `version`, returning the number of cells set.
    pub fn merge(&mut self, version: &str, results: &[CommandResult]) -> usize {
        for result in results {
            self.set(&result.identity, version, result.duration_ms);
        }
        results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The run had no version label.
    Unlabeled,
    /// The run was labeled but recorded no results.
    NothingToWrite,
    Written { path: PathBuf, cells: usize },
}

#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted report; `None` when the file does not exist.
    pub async fn load(&self) -> Result<Option<PersistedReport>, BenchError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(BenchError::ReportRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let report = PersistedReport::from_json(&raw).map_err(|source| BenchError::ReportParse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(report))
    }

    pub async fn merge_and_persist(&self, report: &Report) -> Result<MergeOutcome, BenchError> {
        let Some(version) = report.version.as_deref() else {
            tracing::info!(target: "cmdbench.report", "unlabeled run, report not persisted");
            return Ok(MergeOutcome::Unlabeled);
        };
        if report.commands.is_empty() {
            tracing::info!(target: "cmdbench.report", version, "no results to persist");
            return Ok(MergeOutcome::NothingToWrite);
        }

        let mut persisted = match self.load().await {
            Ok(existing) => existing.unwrap_or_default(),
            Err(err) => {
                dump_unsaved(report);
                return Err(err);
            }
        };
        let cells = persisted.merge(version, &report.commands);

        if let Err(err) = self.write(&persisted).await {
            dump_unsaved(report);
            return Err(err);
        }

        tracing::info!(
            target: "cmdbench.report",
            path = %self.path.display(),
            version,
            cells,
            "report merged"
        );
        Ok(MergeOutcome::Written {
            path: self.path.clone(),
            cells,
        })
    }

    /// Sibling of the report file used for atomic replacement.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "report".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replaces the report file via a sibling temp file and rename.
    pub async fn write(&self, persisted: &PersistedReport) -> Result<(), BenchError> {
        let write_err = |source: std::io::Error| BenchError::ReportWrite {
            path: self.path.clone(),
            source,
        };

        let json = persisted.to_json().map_err(|e| write_err(std::io::Error::other(e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let tmp_path = self.temp_path();
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_err(e));
        }
        Ok(())
    }
}

fn unsaved_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn dump_unsaved(report: &Report) {
    match unsaved_json(report) {
        Ok(json) => {
            tracing::error!(target: "cmdbench.report", report = %json, "report merge failed");
            eprintln!(">>> unsaved report data:\n{}", json);
        }
        Err(e) => {
            tracing::error!(target: "cmdbench.report", error = %e, "report merge failed and could not be serialized");
        }
    }
}
