//! Error types for the locator.

use dom_bridge::DomError;
use thiserror::Error;

/// Failures from polling waits.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// No candidate matched a visible element before the timeout. Carries
    /// every attempted candidate for diagnostics.
    #[error("timeout after {timeout_ms}ms waiting for any of: {}", .candidates.join(", "))]
    NotFound {
        candidates: Vec<String>,
        timeout_ms: u64,
    },

    /// The element was still present when a disappearance wait timed out.
    #[error("timeout after {timeout_ms}ms waiting for element to disappear: {selector}")]
    StillPresent { selector: String, timeout_ms: u64 },

    /// A custom condition never became true.
    #[error("timeout after {timeout_ms}ms waiting for condition: {description}")]
    ConditionTimeout {
        description: String,
        timeout_ms: u64,
    },

    /// Bridge failure other than an invalid selector (those are skipped).
    #[error(transparent)]
    Bridge(#[from] DomError),
}
