//! Shared primitives for the CadPilot automation workspace.
//!
//! Home of the closed [`UiAction`] union produced by the planning
//! collaborator, the [`PlanningDocument`] it derives actions from, and the
//! run identifier used for tracing across crates.

use std::fmt;

use uuid::Uuid;

mod action;
mod plan;

pub use action::{parse_actions, ActionParseError, Key, Plane, UiAction};
pub use plan::{Dimension, Feature, PlanningDocument};

/// Identifier for one executor run over an action list.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
