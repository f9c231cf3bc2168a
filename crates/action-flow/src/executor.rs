//! The sequence executor.

use std::sync::Arc;

use action_interpreter::{ActionInterpreter, InterpreterError};
use action_primitives::{hide_action_tooltip, show_action_tooltip};
use cadpilot_core_types::UiAction;
use dom_bridge::DomBridge;
use element_locator::sleep_ms;
use tracing::{info, warn};

use crate::errors::FlowError;
use crate::session::ExecSession;
use crate::types::{ExecEvent, ExecOptions, ExecPhase, ExecReport};

/// Drives an action list through the interpreter, fail-fast.
pub struct SequenceExecutor {
    interpreter: Arc<dyn ActionInterpreter>,
    bridge: Arc<dyn DomBridge>,
    options: ExecOptions,
}

impl SequenceExecutor {
    pub fn new(interpreter: Arc<dyn ActionInterpreter>, bridge: Arc<dyn DomBridge>) -> Self {
        Self {
            interpreter,
            bridge,
            options: ExecOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the whole sequence. The session's gate is honored before every
    /// attempt, so pause and cancel take effect between actions and between
    /// retries, never mid-action.
    pub async fn run(
        &self,
        session: &ExecSession,
        actions: &[UiAction],
    ) -> Result<ExecReport, FlowError> {
        let total = actions.len();
        let mut report = ExecReport::begin(total);
        info!(run_id = %report.run_id, total, "starting sequence");

        session.begin(total);
        session.emit(ExecEvent::Started { total });

        for (index, action) in actions.iter().enumerate() {
            // Point the snapshot at the upcoming action before gating, so a
            // paused run reports what it will do next.
            session.set_current(index, action.describe());
            if session.gate().await.is_err() {
                return Err(self.cancelled(session).await);
            }

            session.emit(ExecEvent::ActionStarted {
                index,
                total,
                description: action.describe(),
            });
            if self.options.show_tooltip {
                let _ = show_action_tooltip(self.bridge.as_ref(), &action.describe()).await;
            }

            self.run_with_retry(session, index, action).await?;

            report.completed += 1;
            session.emit(ExecEvent::ActionCompleted { index });

            // WAIT carries its own duration; no extra settle on top.
            let settle = !matches!(action, UiAction::Wait { .. });
            if settle && index + 1 < total && self.options.pause_between_actions_ms > 0 {
                sleep_ms(self.options.pause_between_actions_ms).await;
            }
        }

        let _ = hide_action_tooltip(self.bridge.as_ref()).await;
        session.set_phase(ExecPhase::Completed);
        session.emit(ExecEvent::Completed);

        let report = report.finish();
        info!(run_id = %report.run_id, latency_ms = report.latency_ms, "sequence completed");
        Ok(report)
    }

    async fn run_with_retry(
        &self,
        session: &ExecSession,
        index: usize,
        action: &UiAction,
    ) -> Result<(), FlowError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 && session.gate().await.is_err() {
                return Err(self.cancelled(session).await);
            }

            match self.interpreter.run(action).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.options.retry_count => {
                    attempt += 1;
                    warn!(index, attempt, error = %err, "action failed, retrying");
                    session.emit(ExecEvent::ActionRetried {
                        index,
                        attempt,
                        error: err.to_string(),
                    });
                    sleep_ms(self.options.retry_delay_ms).await;
                }
                Err(err) => return self.failed(session, index, action, err).await,
            }
        }
    }

    async fn failed(
        &self,
        session: &ExecSession,
        index: usize,
        action: &UiAction,
        source: InterpreterError,
    ) -> Result<(), FlowError> {
        let _ = hide_action_tooltip(self.bridge.as_ref()).await;
        session.set_phase(ExecPhase::Failed);
        session.emit(ExecEvent::Failed {
            index,
            error: source.to_string(),
        });
        warn!(index, action = action.kind(), error = %source, "sequence failed");
        Err(FlowError::ActionFailed {
            index,
            action: action.kind().to_string(),
            source,
        })
    }

    async fn cancelled(&self, session: &ExecSession) -> FlowError {
        let _ = hide_action_tooltip(self.bridge.as_ref()).await;
        session.set_phase(ExecPhase::Cancelled);
        session.emit(ExecEvent::Cancelled);
        info!("sequence cancelled");
        FlowError::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dom_bridge::FakeDom;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::broadcast;

    /// Interpreter double that replays scripted outcomes in order and
    /// records which actions it was asked to run.
    struct ScriptedRunner {
        outcomes: Mutex<VecDeque<Result<(), InterpreterError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn always_ok() -> Self {
            Self::with_outcomes(vec![])
        }

        fn with_outcomes(outcomes: Vec<Result<(), InterpreterError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl ActionInterpreter for ScriptedRunner {
        async fn run(&self, action: &UiAction) -> Result<(), InterpreterError> {
            self.calls.lock().push(action.kind().to_string());
            self.outcomes.lock().pop_front().unwrap_or(Ok(()))
        }
    }

    fn quick() -> ExecOptions {
        ExecOptions::default()
            .with_retry_delay_ms(10)
            .with_pause_between_actions_ms(0)
            .without_tooltip()
    }

    fn executor(runner: Arc<ScriptedRunner>, options: ExecOptions) -> SequenceExecutor {
        SequenceExecutor::new(runner, Arc::new(FakeDom::new())).with_options(options)
    }

    fn sample_actions(n: usize) -> Vec<UiAction> {
        (0..n).map(|_| UiAction::ClickOk).collect()
    }

    fn drain(rx: &mut broadcast::Receiver<ExecEvent>) -> Vec<ExecEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_runs_all_actions_in_order() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let session = ExecSession::new();
        let mut rx = session.subscribe();

        let report = executor(runner.clone(), quick())
            .run(&session, &sample_actions(3))
            .await
            .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.completed, 3);
        assert_eq!(runner.call_count(), 3);
        assert_eq!(session.state().phase, ExecPhase::Completed);

        let events = drain(&mut rx);
        assert_eq!(events.first(), Some(&ExecEvent::Started { total: 3 }));
        assert_eq!(events.last(), Some(&ExecEvent::Completed));
    }

    #[tokio::test]
    async fn test_retry_then_success_reports_progress_once() {
        let runner = Arc::new(ScriptedRunner::with_outcomes(vec![
            Err(InterpreterError::NoActiveInput),
            Ok(()),
        ]));
        let session = ExecSession::new();
        let mut rx = session.subscribe();

        let report = executor(runner.clone(), quick())
            .run(&session, &sample_actions(1))
            .await
            .unwrap();

        assert_eq!(report.completed, 1);
        assert_eq!(runner.call_count(), 2);

        let events = drain(&mut rx);
        let started = events
            .iter()
            .filter(|e| matches!(e, ExecEvent::ActionStarted { .. }))
            .count();
        assert_eq!(started, 1);
        assert!(events.contains(&ExecEvent::ActionRetried {
            index: 0,
            attempt: 1,
            error: "no active input to type into".into(),
        }));
    }

    #[tokio::test]
    async fn test_exhausted_retries_fail_the_sequence() {
        let runner = Arc::new(ScriptedRunner::with_outcomes(vec![
            Err(InterpreterError::NoActiveInput),
            Err(InterpreterError::NoActiveInput),
            Err(InterpreterError::NoActiveInput),
        ]));
        let session = ExecSession::new();

        let err = executor(runner.clone(), quick())
            .run(&session, &sample_actions(2))
            .await
            .unwrap_err();

        // retry_count 2 means three attempts, then stop without touching
        // the second action.
        assert_eq!(runner.call_count(), 3);
        assert_eq!(session.state().phase, ExecPhase::Failed);
        assert!(matches!(
            err,
            FlowError::ActionFailed { index: 0, ref action, .. } if action == "CLICK_OK"
        ));
    }

    #[tokio::test]
    async fn test_fatal_error_is_not_retried() {
        let runner = Arc::new(ScriptedRunner::with_outcomes(vec![Err(
            InterpreterError::Fatal("unknown plane: Bottom".into()),
        )]));
        let session = ExecSession::new();

        let err = executor(runner.clone(), quick())
            .run(&session, &sample_actions(1))
            .await
            .unwrap_err();

        assert_eq!(runner.call_count(), 1);
        assert!(matches!(err, FlowError::ActionFailed { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_pause_holds_before_next_action() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let session = ExecSession::new();
        session.pause();

        let exec_session = session.clone();
        let exec_runner = runner.clone();
        let handle = tokio::spawn(async move {
            executor(exec_runner, quick())
                .run(&exec_session, &sample_actions(2))
                .await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runner.call_count(), 0);
        assert_eq!(session.state().phase, ExecPhase::Paused);

        session.resume();
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.completed, 2);
    }

    #[tokio::test]
    async fn test_state_snapshot_reports_action_in_flight() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let session = ExecSession::new();
        session.pause();

        let actions = sample_actions(3);
        let expected = actions[0].describe();
        let exec_session = session.clone();
        let handle = tokio::spawn(async move {
            executor(runner, quick()).run(&exec_session, &actions).await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = session.state();
        assert!(state.paused());
        assert_eq!(state.current_index, 0);
        assert_eq!(state.total, 3);
        assert_eq!(state.current_action.as_deref(), Some(expected.as_str()));

        session.resume();
        handle.await.unwrap().unwrap();
        assert_eq!(session.state().current_index, 2);
    }

    #[tokio::test]
    async fn test_cancel_stops_the_run() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let session = ExecSession::new();
        session.cancel();

        let err = executor(runner.clone(), quick())
            .run(&session, &sample_actions(3))
            .await
            .unwrap_err();

        assert_eq!(runner.call_count(), 0);
        assert_eq!(session.state().phase, ExecPhase::Cancelled);
        assert!(matches!(err, FlowError::Cancelled));
    }

    #[tokio::test]
    async fn test_wait_actions_skip_the_settle_delay() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let session = ExecSession::new();
        let actions = vec![UiAction::Wait { ms: 0 }, UiAction::Wait { ms: 0 }];

        let started = tokio::time::Instant::now();
        executor(runner, quick().with_pause_between_actions_ms(200))
            .run(&session, &actions)
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_tooltip_removed_after_run() {
        let runner = Arc::new(ScriptedRunner::always_ok());
        let dom = FakeDom::new();
        let session = ExecSession::new();

        SequenceExecutor::new(runner, Arc::new(dom.clone()))
            .with_options(
                ExecOptions::default()
                    .with_retry_delay_ms(10)
                    .with_pause_between_actions_ms(0),
            )
            .run(&session, &sample_actions(1))
            .await
            .unwrap();

        assert_eq!(dom.overlay_text("cadpilot-action-tooltip"), None);
    }
}
