use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ErrorEntry, PipelineStatus, RunId};

/// Summary of one run, suitable for `--report-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub status: PipelineStatus,
    pub modules: usize,
    /// Global ledger at the time of the report.
    pub errors: Vec<ErrorEntry>,
    /// Container count per type tag.
    pub containers: BTreeMap<String, usize>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn critical_errors(&self) -> usize {
        self.errors.iter().filter(|e| e.is_critical()).count()
    }
}
