//! Run session: pause gate, cancellation and the progress stream.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::FlowError;
use crate::types::{ExecEvent, ExecPhase, ExecutionState};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Shared control handle for a sequence run.
///
/// Clones refer to the same run: a UI thread holds one clone to
/// pause/resume/cancel and subscribe to progress, the executor holds
/// another and blocks on the gate between actions. The pause flag is a
/// watch channel, so a resume is seen even if it happens before the
/// executor reaches the gate.
#[derive(Clone)]
pub struct ExecSession {
    inner: Arc<Inner>,
}

struct Inner {
    paused_tx: watch::Sender<bool>,
    events: broadcast::Sender<ExecEvent>,
    cancel: CancellationToken,
    state: RwLock<ExecutionState>,
}

impl ExecSession {
    pub fn new() -> Self {
        let (paused_tx, _) = watch::channel(false);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                paused_tx,
                events,
                cancel: CancellationToken::new(),
                state: RwLock::new(ExecutionState::default()),
            }),
        }
    }

    /// Ask the run to hold before its next action.
    pub fn pause(&self) {
        info!("pause requested");
        let _ = self.inner.paused_tx.send(true);
    }

    /// Release a paused run.
    pub fn resume(&self) {
        info!("resume requested");
        let _ = self.inner.paused_tx.send(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.inner.paused_tx.borrow()
    }

    /// Cancel the run. Takes effect at the next gate, including while
    /// paused.
    pub fn cancel(&self) {
        info!("cancel requested");
        self.inner.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Snapshot of the run: phase, progress and the action in flight.
    pub fn state(&self) -> ExecutionState {
        self.inner.state.read().clone()
    }

    /// Subscribe to progress events. Late subscribers miss earlier events.
    pub fn subscribe(&self) -> broadcast::Receiver<ExecEvent> {
        self.inner.events.subscribe()
    }

    pub(crate) fn emit(&self, event: ExecEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    /// Reset the snapshot for a fresh run.
    pub(crate) fn begin(&self, total: usize) {
        *self.inner.state.write() = ExecutionState {
            phase: ExecPhase::Running,
            current_index: 0,
            total,
            current_action: None,
        };
    }

    pub(crate) fn set_current(&self, index: usize, description: String) {
        let mut state = self.inner.state.write();
        state.current_index = index;
        state.current_action = Some(description);
    }

    pub(crate) fn set_phase(&self, phase: ExecPhase) {
        self.inner.state.write().phase = phase;
    }

    /// Block while paused, fail if cancelled.
    pub(crate) async fn gate(&self) -> Result<(), FlowError> {
        if self.is_cancelled() {
            return Err(FlowError::Cancelled);
        }

        let mut rx = self.inner.paused_tx.subscribe();
        if !*rx.borrow() {
            return Ok(());
        }

        debug!("run paused at gate");
        self.set_phase(ExecPhase::Paused);
        self.emit(ExecEvent::Paused);

        loop {
            tokio::select! {
                _ = self.inner.cancel.cancelled() => return Err(FlowError::Cancelled),
                changed = rx.changed() => {
                    // Sender dropping means the session is gone.
                    changed.map_err(|_| FlowError::Cancelled)?;
                    if !*rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("run resumed");
        self.set_phase(ExecPhase::Running);
        self.emit(ExecEvent::Resumed);
        Ok(())
    }
}

impl Default for ExecSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_gate_passes_when_not_paused() {
        let session = ExecSession::new();
        session.gate().await.unwrap();
    }

    #[tokio::test]
    async fn test_gate_blocks_until_resume() {
        let session = ExecSession::new();
        session.pause();

        let gated = session.clone();
        let handle = tokio::spawn(async move { gated.gate().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        session.resume();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_cancel_releases_paused_gate() {
        let session = ExecSession::new();
        session.pause();

        let gated = session.clone();
        let handle = tokio::spawn(async move { gated.gate().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        session.cancel();

        assert!(matches!(handle.await.unwrap(), Err(FlowError::Cancelled)));
    }

    #[tokio::test]
    async fn test_resume_before_gate_is_not_lost() {
        let session = ExecSession::new();
        session.pause();
        session.resume();
        session.gate().await.unwrap();
    }
}
