//! Error types for interaction primitives.

use dom_bridge::DomError;
use thiserror::Error;

/// Failures during a single primitive interaction.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// No button on the page answers to this human-readable name.
    #[error("button not found: {0}")]
    ButtonNotFound(String),

    /// No input on the page answers to this human-readable name.
    #[error("input not found: {0}")]
    InputNotFound(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
