//! Action interpreter for the host CAD application.
//!
//! One total mapping from each [`cadpilot_core_types::UiAction`] variant to
//! a short protocol of locator and primitive calls. All knowledge of which
//! selectors describe which logical target lives in the declarative tables
//! of [`selectors`]; the control flow here never embeds a query string for a
//! named target.

pub mod errors;
pub mod selectors;

mod dialogs;
mod interpreter;
mod sketch;

pub use errors::InterpreterError;
pub use interpreter::{ActionInterpreter, OnshapeInterpreter};
