//! Core data types for the DOM bridge.

use serde::{Deserialize, Serialize};

/// Opaque reference to a live element on the page.
///
/// Handles are only trustworthy for the duration of a single primitive call;
/// callers re-query across suspension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

/// Layout box of an element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric center, where synthetic pointer events are aimed.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pointer event kinds in the order a real click produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseEventKind {
    Enter,
    Over,
    Down,
    Move,
    Up,
    Click,
}

impl MouseEventKind {
    pub fn dom_name(&self) -> &'static str {
        match self {
            MouseEventKind::Enter => "mouseenter",
            MouseEventKind::Over => "mouseover",
            MouseEventKind::Down => "mousedown",
            MouseEventKind::Move => "mousemove",
            MouseEventKind::Up => "mouseup",
            MouseEventKind::Click => "click",
        }
    }
}

/// A synthetic pointer event aimed at page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub client_x: f64,
    pub client_y: f64,
    pub button: u8,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
            button: 0,
        }
    }
}

/// Keyboard event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEventKind {
    Down,
    Press,
    Up,
}

impl KeyEventKind {
    pub fn dom_name(&self) -> &'static str {
        match self {
            KeyEventKind::Down => "keydown",
            KeyEventKind::Press => "keypress",
            KeyEventKind::Up => "keyup",
        }
    }
}

/// A synthetic keyboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: String,
    pub key_code: u32,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, key: impl Into<String>, key_code: u32) -> Self {
        Self {
            kind,
            key: key.into(),
            key_code,
        }
    }

    /// Bare key-up with no specific key, dispatched after programmatic input
    /// for frameworks that listen on any keyboard activity.
    pub fn bare_keyup() -> Self {
        Self::new(KeyEventKind::Up, "", 0)
    }
}
