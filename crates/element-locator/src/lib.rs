//! Element resolution over an asynchronously rendered, externally
//! controlled page.
//!
//! Everything here is black-box polling: try each candidate query on a fixed
//! interval until one matches a visible element or the timeout elapses.
//! Candidate ordering encodes priority (stable attributes first, brittle
//! text matches last); an invalid candidate is skipped, never fatal.

pub mod errors;

mod waiter;

pub use errors::LocatorError;
pub use waiter::{
    sleep_ms, wait_for_any, wait_for_condition, wait_for_element, wait_for_gone, WaitOptions,
};
