//! Core types for sequence execution.

use cadpilot_core_types::RunId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tuning for a sequence run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExecOptions {
    /// Retries per action after the first attempt.
    pub retry_count: u32,

    /// Fixed delay between attempts of the same action, in milliseconds.
    pub retry_delay_ms: u64,

    /// Settle delay after each completed action, in milliseconds.
    pub pause_between_actions_ms: u64,

    /// Show the floating action tooltip while running.
    pub show_tooltip: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            retry_count: 2,
            retry_delay_ms: 400,
            pause_between_actions_ms: 300,
            show_tooltip: true,
        }
    }
}

impl ExecOptions {
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_pause_between_actions_ms(mut self, pause_ms: u64) -> Self {
        self.pause_between_actions_ms = pause_ms;
        self
    }

    pub fn without_tooltip(mut self) -> Self {
        self.show_tooltip = false;
        self
    }
}

/// Lifecycle phase of a sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecPhase {
    Idle,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

/// Point-in-time snapshot of a run, readable from the session at any
/// moment without subscribing to the event stream.
///
/// `current_index` points at the action in flight, or at the upcoming
/// action while the run is held at the pause gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    pub phase: ExecPhase,
    pub current_index: usize,
    pub total: usize,
    pub current_action: Option<String>,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self {
            phase: ExecPhase::Idle,
            current_index: 0,
            total: 0,
            current_action: None,
        }
    }
}

impl ExecutionState {
    pub fn running(&self) -> bool {
        self.phase == ExecPhase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == ExecPhase::Paused
    }
}

/// Progress events broadcast to UI consumers.
///
/// `ActionStarted` is emitted exactly once per action, regardless of how
/// many attempts the action takes; retries surface as `ActionRetried`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecEvent {
    Started {
        total: usize,
    },
    ActionStarted {
        index: usize,
        total: usize,
        description: String,
    },
    ActionRetried {
        index: usize,
        attempt: u32,
        error: String,
    },
    ActionCompleted {
        index: usize,
    },
    Paused,
    Resumed,
    Completed,
    Failed {
        index: usize,
        error: String,
    },
    Cancelled,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecReport {
    pub run_id: RunId,
    pub total: usize,
    pub completed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub latency_ms: u64,
}

impl ExecReport {
    pub(crate) fn begin(total: usize) -> Self {
        let now = Utc::now();
        Self {
            run_id: RunId::new(),
            total,
            completed: 0,
            started_at: now,
            finished_at: now,
            latency_ms: 0,
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self.latency_ms = (self.finished_at - self.started_at).num_milliseconds() as u64;
        self
    }
}
