//! Error types for action interpretation.

use action_primitives::PrimitiveError;
use dom_bridge::DomError;
use element_locator::LocatorError;
use thiserror::Error;

/// Failure of a single action attempt.
///
/// Everything except [`InterpreterError::Fatal`] is transient from the
/// executor's point of view: the host application renders asynchronously,
/// so a dialog that is not there yet may well be there on the next attempt.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    #[error(transparent)]
    Dom(#[from] DomError),

    /// TYPE_VALUE with nothing focused.
    #[error("no active input to type into")]
    NoActiveInput,

    /// FOCUS_INPUT resolved an element with nothing focusable inside.
    #[error("focusable input not found for selector: {0}")]
    NoFocusableInput(String),

    /// Non-recoverable failure; retrying cannot help.
    #[error("{0}")]
    Fatal(String),
}

impl InterpreterError {
    /// Whether the executor may retry the action after this error.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, InterpreterError::Fatal(_))
    }
}
