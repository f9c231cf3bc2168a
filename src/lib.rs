//! CadPilot: resilient UI automation for browser-based parametric CAD.
//!
//! The facade wires a [`DomBridge`] implementation into the full stack:
//! the Onshape action interpreter, the retrying sequence executor with its
//! pause/cancel session, and the viewport capture controller. Collaborators
//! hand over action lists (typed or as JSON) and subscribe to progress
//! events; everything in between is this workspace's job.

use std::sync::Arc;

use action_flow::{ExecOptions, ExecReport, ExecSession, FlowError, SequenceExecutor};
use action_interpreter::{selectors, OnshapeInterpreter};
use cadpilot_core_types::{parse_actions, ActionParseError, UiAction};
use dom_bridge::DomBridge;
use element_locator::WaitOptions;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::info;
use viewport_capture::{CaptureError, ViewportController};

pub mod telemetry;

pub use action_flow::{ExecEvent, ExecPhase, ExecutionState};
pub use cadpilot_core_types::{Key, Plane, PlanningDocument};

/// Top-level failure surface of a [`Pilot`].
#[derive(Debug, Error)]
pub enum PilotError {
    /// The collaborator JSON was rejected before anything ran.
    #[error(transparent)]
    Parse(#[from] ActionParseError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// One automation engine bound to one page.
pub struct Pilot {
    bridge: Arc<dyn DomBridge>,
    exec_options: ExecOptions,
    wait: WaitOptions,
    session: ExecSession,
}

impl Pilot {
    pub fn new(bridge: Arc<dyn DomBridge>) -> Self {
        Self {
            bridge,
            exec_options: ExecOptions::default(),
            wait: WaitOptions::default(),
            session: ExecSession::new(),
        }
    }

    pub fn with_options(mut self, options: ExecOptions) -> Self {
        self.exec_options = options;
        self
    }

    /// Override the element polling profile for every component.
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Run a typed action list to completion.
    pub async fn execute_actions(&self, actions: &[UiAction]) -> Result<ExecReport, PilotError> {
        let interpreter = Arc::new(
            OnshapeInterpreter::new(self.bridge.clone()).with_wait_options(self.wait),
        );
        let executor = SequenceExecutor::new(interpreter, self.bridge.clone())
            .with_options(self.exec_options);
        Ok(executor.run(&self.session, actions).await?)
    }

    /// Parse collaborator JSON and run it. A malformed list or unknown
    /// action type fails here, before any action touches the page.
    pub async fn execute_actions_json(
        &self,
        value: &serde_json::Value,
    ) -> Result<ExecReport, PilotError> {
        let actions = parse_actions(value)?;
        info!(count = actions.len(), "parsed action list");
        self.execute_actions(&actions).await
    }

    /// Hold the run before its next action.
    pub fn pause(&self) {
        self.session.pause();
    }

    /// Release a paused run.
    pub fn resume(&self) {
        self.session.resume();
    }

    /// Cancel the run at its next gate.
    pub fn cancel(&self) {
        self.session.cancel();
    }

    /// Snapshot of the run: phase, progress and the action in flight.
    pub fn state(&self) -> ExecutionState {
        self.session.state()
    }

    /// Subscribe to progress events for UI display.
    pub fn events(&self) -> broadcast::Receiver<ExecEvent> {
        self.session.subscribe()
    }

    /// Capture the part from eight angles for the verification
    /// collaborator.
    pub async fn capture_part_views(&self) -> Result<Vec<String>, PilotError> {
        let controller = ViewportController::new(
            self.bridge.clone(),
            selectors::viewport_canvas_candidates(),
        )
        .with_wait_options(self.wait);
        Ok(controller.capture_eight_angles().await?)
    }
}
