//! Core UI interaction primitives.
//!
//! Building blocks the interpreter composes into per-action protocols:
//! - realistic click simulation (full pointer sequence + native activation)
//! - input filling with the event choreography frameworks listen for
//! - by-name resolution of buttons and inputs when no selector table applies
//! - the floating action tooltip

pub mod errors;
pub mod types;

mod click;
mod fill;
mod resolve;
mod tooltip;

pub use click::click_element;
pub use errors::PrimitiveError;
pub use fill::fill_input;
pub use resolve::{click_button_by_name, fill_input_by_name, find_button_by_name, find_input_by_name};
pub use tooltip::{hide_action_tooltip, show_action_tooltip};
pub use types::{ClickOptions, FillOptions};
