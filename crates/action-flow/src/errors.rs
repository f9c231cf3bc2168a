//! Error types for sequence execution.

use action_interpreter::InterpreterError;
use thiserror::Error;

/// Terminal failure of a sequence run.
#[derive(Debug, Error)]
pub enum FlowError {
    /// An action exhausted its retries or failed fatally. The sequence
    /// stops here; `index` is the zero-based position of the failed action.
    #[error("action {index} ({action}) failed: {source}")]
    ActionFailed {
        index: usize,
        action: String,
        #[source]
        source: InterpreterError,
    },

    /// The run was cancelled through its session.
    #[error("execution cancelled")]
    Cancelled,
}
