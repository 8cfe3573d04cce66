use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::runner::CommandResult;

/// Results collected during one orchestration run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Label the durations are filed under; `None` for an unlabeled run.
    pub version: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub successes: usize,
    pub failures: usize,
    pub commands: Vec<CommandResult>,
}

impl Report {
    pub fn new(version: Option<String>) -> Self {
        Self {
            version,
            started_at: Utc::now(),
            ended_at: None,
            successes: 0,
            failures: 0,
            commands: Vec::new(),
        }
    }

    pub fn record(&mut self, result: CommandResult) {
        if result.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.commands.push(result);
    }

    pub fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    pub fn total_duration_ms(&self) -> i64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds().max(0)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(" * {} commands successful", self.successes),
            format!(" * {} commands failed", self.failures),
            format!(" * total duration: {}ms", self.total_duration_ms()),
        ]
    }
}
