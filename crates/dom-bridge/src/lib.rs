//! Port over the host application's live DOM.
//!
//! The host CAD application renders asynchronously and is not under our
//! control, so everything above this crate treats the page as an
//! eventually-consistent external resource: elements are re-queried rather
//! than cached across suspension points, and every operation can fail with a
//! detached handle. The [`DomBridge`] trait is the single seam; production
//! builds back it with the extension's page binding, tests with [`FakeDom`].

pub mod errors;
pub mod types;

mod bridge;
#[cfg(feature = "fake")]
mod fake;

pub use bridge::DomBridge;
pub use errors::DomError;
#[cfg(feature = "fake")]
pub use fake::{FakeDom, NodeSpec, RecordedEvent};
pub use types::{ElementHandle, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind, Rect};
