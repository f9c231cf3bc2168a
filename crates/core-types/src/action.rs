//! The closed UI action union consumed by the sequence executor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keys the interpreter knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Tab,
    Escape,
}

impl Key {
    /// DOM `KeyboardEvent.key` value.
    pub fn dom_key(&self) -> &'static str {
        match self {
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Escape => "Escape",
        }
    }

    /// Legacy `keyCode` value, still observed by parts of the host app.
    pub fn key_code(&self) -> u32 {
        match self {
            Key::Enter => 13,
            Key::Tab => 9,
            Key::Escape => 27,
        }
    }
}

/// The three default sketch planes the host application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    Front,
    Top,
    Right,
}

impl Plane {
    pub fn name(&self) -> &'static str {
        match self {
            Plane::Front => "Front",
            Plane::Top => "Top",
            Plane::Right => "Right",
        }
    }
}

/// One abstract UI action against the host application.
///
/// The discriminant set is closed: the interpreter handles every variant
/// exhaustively, and an unrecognized `type` in collaborator JSON is a hard
/// parse failure, never a silent skip. `#name` variable references inside
/// string fields are opaque here; the host application resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiAction {
    ClickButton { button: String },
    SelectPlane { plane: Plane },
    ClickSketchTool { tool: String },
    DrawRectangle { x1: f64, y1: f64, x2: f64, y2: f64 },
    DrawCircle { cx: f64, cy: f64, radius: f64 },
    SetDimension { value: String },
    FillInput { field: String, value: String },
    FocusInput { selector: String },
    TypeValue { value: String },
    PressKey { key: Key },
    SelectFace { selector: String },
    SelectEdge { selector: String },
    CreateHole { diameter: String, depth: String },
    CreateFillet { radius: String },
    CreateChamfer { distance: String },
    ClickOk,
    ClickCancel,
    FinishSketch,
    CreateVariable { name: String, value: String, unit: String },
    ClickTab { tab: String },
    Wait { ms: u64 },
}

impl UiAction {
    /// Stable discriminant name, as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            UiAction::ClickButton { .. } => "CLICK_BUTTON",
            UiAction::SelectPlane { .. } => "SELECT_PLANE",
            UiAction::ClickSketchTool { .. } => "CLICK_SKETCH_TOOL",
            UiAction::DrawRectangle { .. } => "DRAW_RECTANGLE",
            UiAction::DrawCircle { .. } => "DRAW_CIRCLE",
            UiAction::SetDimension { .. } => "SET_DIMENSION",
            UiAction::FillInput { .. } => "FILL_INPUT",
            UiAction::FocusInput { .. } => "FOCUS_INPUT",
            UiAction::TypeValue { .. } => "TYPE_VALUE",
            UiAction::PressKey { .. } => "PRESS_KEY",
            UiAction::SelectFace { .. } => "SELECT_FACE",
            UiAction::SelectEdge { .. } => "SELECT_EDGE",
            UiAction::CreateHole { .. } => "CREATE_HOLE",
            UiAction::CreateFillet { .. } => "CREATE_FILLET",
            UiAction::CreateChamfer { .. } => "CREATE_CHAMFER",
            UiAction::ClickOk => "CLICK_OK",
            UiAction::ClickCancel => "CLICK_CANCEL",
            UiAction::FinishSketch => "FINISH_SKETCH",
            UiAction::CreateVariable { .. } => "CREATE_VARIABLE",
            UiAction::ClickTab { .. } => "CLICK_TAB",
            UiAction::Wait { .. } => "WAIT",
        }
    }

    /// Human-readable label for tooltips and progress reporting.
    pub fn describe(&self) -> String {
        match self {
            UiAction::ClickButton { button } => format!("Clicking \"{}\"", button),
            UiAction::SelectPlane { plane } => format!("Selecting {} plane", plane.name()),
            UiAction::ClickSketchTool { tool } => format!("Selecting {} tool", tool),
            UiAction::DrawRectangle { .. } => "Drawing rectangle".to_string(),
            UiAction::DrawCircle { .. } => "Drawing circle".to_string(),
            UiAction::SetDimension { value } => format!("Setting dimension: {}", value),
            UiAction::FillInput { field, .. } => format!("Filling {}", field),
            UiAction::FocusInput { .. } => "Focusing input".to_string(),
            UiAction::TypeValue { .. } => "Typing value".to_string(),
            UiAction::PressKey { key } => format!("Pressing {}", key.dom_key()),
            UiAction::SelectFace { .. } => "Selecting face".to_string(),
            UiAction::SelectEdge { .. } => "Selecting edge".to_string(),
            UiAction::CreateHole { .. } => "Creating hole".to_string(),
            UiAction::CreateFillet { .. } => "Creating fillet".to_string(),
            UiAction::CreateChamfer { .. } => "Creating chamfer".to_string(),
            UiAction::ClickOk => "Confirming".to_string(),
            UiAction::ClickCancel => "Canceling".to_string(),
            UiAction::FinishSketch => "Finishing sketch".to_string(),
            UiAction::CreateVariable { name, .. } => format!("Creating #{}", name),
            UiAction::ClickTab { tab } => format!("Opening {}", tab),
            UiAction::Wait { .. } => "Waiting...".to_string(),
        }
    }
}

/// Failure to turn collaborator JSON into a typed action list.
#[derive(Debug, Error)]
pub enum ActionParseError {
    /// The `type` discriminant is outside the closed variant set. Fatal by
    /// contract; retrying cannot fix a malformed action list.
    #[error("unknown action type '{found}' at index {index}")]
    UnknownActionType { found: String, index: usize },

    #[error("action at index {index} is malformed: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of actions")]
    NotAnArray,
}

const KNOWN_TYPES: &[&str] = &[
    "CLICK_BUTTON",
    "SELECT_PLANE",
    "CLICK_SKETCH_TOOL",
    "DRAW_RECTANGLE",
    "DRAW_CIRCLE",
    "SET_DIMENSION",
    "FILL_INPUT",
    "FOCUS_INPUT",
    "TYPE_VALUE",
    "PRESS_KEY",
    "SELECT_FACE",
    "SELECT_EDGE",
    "CREATE_HOLE",
    "CREATE_FILLET",
    "CREATE_CHAMFER",
    "CLICK_OK",
    "CLICK_CANCEL",
    "FINISH_SKETCH",
    "CREATE_VARIABLE",
    "CLICK_TAB",
    "WAIT",
];

/// Parse a schema-checked action array, distinguishing an out-of-set
/// discriminant from an otherwise malformed entry.
pub fn parse_actions(value: &serde_json::Value) -> Result<Vec<UiAction>, ActionParseError> {
    let items = value.as_array().ok_or(ActionParseError::NotAnArray)?;
    let mut actions = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let found = item
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default();
        if !KNOWN_TYPES.contains(&found) {
            return Err(ActionParseError::UnknownActionType {
                found: found.to_string(),
                index,
            });
        }
        let action = serde_json::from_value(item.clone())
            .map_err(|source| ActionParseError::Malformed { index, source })?;
        actions.push(action);
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_round_trips_wire_tag() {
        let action = UiAction::CreateVariable {
            name: "x".into(),
            value: "10".into(),
            unit: "mm".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "CREATE_VARIABLE");
        let back: UiAction = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_parse_actions_ok() {
        let value = json!([
            { "type": "CLICK_TAB", "tab": "Variable Studio" },
            { "type": "WAIT", "ms": 500 },
            { "type": "CREATE_VARIABLE", "name": "x", "value": "10", "unit": "mm" }
        ]);
        let actions = parse_actions(&value).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].kind(), "CLICK_TAB");
        assert_eq!(actions[1], UiAction::Wait { ms: 500 });
    }

    #[test]
    fn test_parse_actions_unknown_type_is_fatal() {
        let value = json!([
            { "type": "CLICK_OK" },
            { "type": "TELEPORT", "to": "nowhere" }
        ]);
        match parse_actions(&value) {
            Err(ActionParseError::UnknownActionType { found, index }) => {
                assert_eq!(found, "TELEPORT");
                assert_eq!(index, 1);
            }
            other => panic!("expected UnknownActionType, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_actions_missing_field() {
        let value = json!([{ "type": "CREATE_VARIABLE", "name": "x" }]);
        assert!(matches!(
            parse_actions(&value),
            Err(ActionParseError::Malformed { index: 0, .. })
        ));
    }

    #[test]
    fn test_describe_labels() {
        let action = UiAction::ClickButton {
            button: "Extrude".into(),
        };
        assert_eq!(action.describe(), "Clicking \"Extrude\"");
        assert_eq!(
            UiAction::SelectPlane { plane: Plane::Front }.describe(),
            "Selecting Front plane"
        );
    }
}
