//! Error types for viewport capture.

use dom_bridge::DomError;
use element_locator::LocatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// No viewport canvas matched within the timeout.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
