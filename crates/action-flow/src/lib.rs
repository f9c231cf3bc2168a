//! Sequence execution over the action interpreter.
//!
//! Drives a parsed action list to completion: per-action retry with fixed
//! delay, a cooperative pause gate, cancellation, and a broadcast progress
//! stream for UI consumers. Failure is fail-fast; an exhausted or fatal
//! action aborts the remainder of the sequence.

pub mod errors;
pub mod types;

mod executor;
mod session;

pub use errors::FlowError;
pub use executor::SequenceExecutor;
pub use session::ExecSession;
pub use types::{ExecEvent, ExecOptions, ExecPhase, ExecReport, ExecutionState};
