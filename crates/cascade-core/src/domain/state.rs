//! State - パイプライン実行の状態
//!
//! # 状態遷移
//! - not_started → setup_running → setup_done → run_running → run_done
//! - setup_running / run_running → aborted（フェーズ境界で critical を検出した場合）

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    NotStarted,
    SetupRunning,
    SetupDone,
    RunRunning,
    RunDone,
    Aborted,
}

impl PipelineStatus {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: PipelineStatus) -> bool {
        use PipelineStatus::*;
        matches!(
            (self, next),
            (NotStarted, SetupRunning)
                | (SetupRunning, SetupDone)
                | (SetupDone, RunRunning)
                | (RunRunning, RunDone)
                | (SetupRunning, Aborted)
                | (RunRunning, Aborted)
        )
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStatus::NotStarted => "not_started",
            PipelineStatus::SetupRunning => "setup_running",
            PipelineStatus::SetupDone => "setup_done",
            PipelineStatus::RunRunning => "run_running",
            PipelineStatus::RunDone => "run_done",
            PipelineStatus::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// The two fan-out/join rounds of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Run,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => f.write_str("setup"),
            Phase::Run => f.write_str("run"),
        }
    }
}
