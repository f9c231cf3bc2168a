//! Error types for DOM bridge operations.

use thiserror::Error;

/// Failures surfaced by a [`crate::DomBridge`] implementation.
#[derive(Debug, Error, Clone)]
pub enum DomError {
    /// The query string could not be parsed by the page's selector engine.
    /// Locators skip these candidates instead of failing the lookup.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// The handle no longer points at a live element. The host application
    /// mutates the page at will, so any handle can go stale between calls.
    #[error("element detached: {0}")]
    Detached(String),

    /// Transport or page-binding failure.
    #[error("bridge backend error: {0}")]
    Backend(String),
}
