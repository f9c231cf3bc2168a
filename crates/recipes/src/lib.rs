//! Canned action sequences for common parametric features.
//!
//! Each builder produces a full action list driving the Variable Studio
//! first, so every dimension of the resulting feature references a named
//! `#variable` instead of a literal. The sequences interleave short WAITs
//! where the host application animates between states.

use cadpilot_core_types::{Plane, UiAction};

/// Sketch a rectangle on the Front plane and extrude it, with all three
/// dimensions backed by `#box_*` variables.
pub fn create_box_actions(length: f64, width: f64, height: f64, unit: &str) -> Vec<UiAction> {
    let mut actions = vec![
        UiAction::ClickTab {
            tab: "Variable Studio".into(),
        },
        UiAction::Wait { ms: 500 },
    ];
    actions.extend(variable("box_length", length, unit));
    actions.extend(variable("box_width", width, unit));
    actions.extend(variable("box_height", height, unit));
    actions.extend([
        UiAction::ClickTab {
            tab: "Part Studio 1".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::ClickButton {
            button: "Sketch".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::SelectPlane { plane: Plane::Front },
        UiAction::Wait { ms: 500 },
        UiAction::ClickSketchTool {
            tool: "Rectangle".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::DrawRectangle {
            x1: -length / 2.0,
            y1: -width / 2.0,
            x2: length / 2.0,
            y2: width / 2.0,
        },
        UiAction::Wait { ms: 300 },
        // Arm the dimension tool so the operator can pin edges to the
        // variables before the sketch closes.
        UiAction::ClickSketchTool {
            tool: "Dimension".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::FinishSketch,
        UiAction::Wait { ms: 500 },
        UiAction::ClickButton {
            button: "Extrude".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::FillInput {
            field: "Depth".into(),
            value: "#box_height".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::ClickOk,
    ]);
    actions
}

/// Sketch a circle on the Top plane and extrude it into a cylinder.
pub fn create_cylinder_actions(diameter: f64, height: f64, unit: &str) -> Vec<UiAction> {
    let mut actions = vec![
        UiAction::ClickTab {
            tab: "Variable Studio".into(),
        },
        UiAction::Wait { ms: 500 },
    ];
    actions.extend(variable("cylinder_diameter", diameter, unit));
    actions.extend(variable("cylinder_height", height, unit));
    actions.extend([
        UiAction::ClickTab {
            tab: "Part Studio 1".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::ClickButton {
            button: "Sketch".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::SelectPlane { plane: Plane::Top },
        UiAction::Wait { ms: 500 },
        UiAction::ClickSketchTool {
            tool: "Circle".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::DrawCircle {
            cx: 0.0,
            cy: 0.0,
            radius: diameter / 2.0,
        },
        UiAction::Wait { ms: 300 },
        UiAction::FinishSketch,
        UiAction::Wait { ms: 500 },
        UiAction::ClickButton {
            button: "Extrude".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::FillInput {
            field: "Depth".into(),
            value: "#cylinder_height".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::ClickOk,
    ]);
    actions
}

/// Open the hole dialog on existing geometry, parameters backed by
/// `#hole_*` variables. Face selection stays with the user.
pub fn create_hole_actions(diameter: f64, depth: f64, unit: &str) -> Vec<UiAction> {
    let mut actions = vec![
        UiAction::ClickTab {
            tab: "Variable Studio".into(),
        },
        UiAction::Wait { ms: 300 },
    ];
    actions.extend(variable("hole_diameter", diameter, unit));
    actions.extend(variable("hole_depth", depth, unit));
    actions.extend([
        UiAction::ClickTab {
            tab: "Part Studio 1".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::ClickButton {
            button: "Hole".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::FillInput {
            field: "Diameter".into(),
            value: "#hole_diameter".into(),
        },
        UiAction::FillInput {
            field: "Depth".into(),
            value: "#hole_depth".into(),
        },
        UiAction::ClickOk,
    ]);
    actions
}

/// Open the fillet dialog, radius backed by `#fillet_radius`. Edge
/// selection stays with the user.
pub fn create_fillet_actions(radius: f64, unit: &str) -> Vec<UiAction> {
    let mut actions = vec![
        UiAction::ClickTab {
            tab: "Variable Studio".into(),
        },
        UiAction::Wait { ms: 300 },
    ];
    actions.extend(variable("fillet_radius", radius, unit));
    actions.extend([
        UiAction::ClickTab {
            tab: "Part Studio 1".into(),
        },
        UiAction::Wait { ms: 300 },
        UiAction::ClickButton {
            button: "Fillet".into(),
        },
        UiAction::Wait { ms: 500 },
        UiAction::FillInput {
            field: "Radius".into(),
            value: "#fillet_radius".into(),
        },
        UiAction::ClickOk,
    ]);
    actions
}

fn variable(name: &str, value: f64, unit: &str) -> [UiAction; 2] {
    [
        UiAction::CreateVariable {
            name: name.into(),
            value: format_value(value),
            unit: unit.into(),
        },
        UiAction::Wait { ms: 300 },
    ]
}

/// Render a dimension the way a user would type it: no trailing `.0` on
/// whole numbers.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(actions: &[UiAction]) -> Vec<&'static str> {
        actions.iter().map(|a| a.kind()).collect()
    }

    #[test]
    fn test_box_creates_variables_before_tab_switch() {
        let actions = create_box_actions(100.0, 50.0, 25.0, "mm");

        let part_studio_switch = actions
            .iter()
            .position(|a| matches!(a, UiAction::ClickTab { tab } if tab == "Part Studio 1"))
            .unwrap();
        let variables: Vec<_> = actions
            .iter()
            .enumerate()
            .filter_map(|(i, a)| match a {
                UiAction::CreateVariable { name, .. } => Some((i, name.as_str())),
                _ => None,
            })
            .collect();

        assert_eq!(
            variables.iter().map(|(_, n)| *n).collect::<Vec<_>>(),
            vec!["box_length", "box_width", "box_height"]
        );
        assert!(variables.iter().all(|(i, _)| *i < part_studio_switch));
    }

    #[test]
    fn test_box_extrude_references_height_variable() {
        let actions = create_box_actions(100.0, 50.0, 25.0, "mm");

        let finish_count = kinds(&actions)
            .iter()
            .filter(|k| **k == "FINISH_SKETCH")
            .count();
        assert_eq!(finish_count, 1);

        let depth = actions
            .iter()
            .find_map(|a| match a {
                UiAction::FillInput { field, value } if field == "Depth" => Some(value.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(depth, "#box_height");

        // Sketch must be finished before the extrude dialog opens.
        let finish = kinds(&actions).iter().position(|k| *k == "FINISH_SKETCH").unwrap();
        let extrude = actions
            .iter()
            .position(|a| matches!(a, UiAction::ClickButton { button } if button == "Extrude"))
            .unwrap();
        assert!(finish < extrude);
    }

    #[test]
    fn test_box_rectangle_is_centered() {
        let actions = create_box_actions(100.0, 50.0, 25.0, "mm");
        let rect = actions
            .iter()
            .find(|a| matches!(a, UiAction::DrawRectangle { .. }))
            .unwrap();
        assert_eq!(
            rect,
            &UiAction::DrawRectangle {
                x1: -50.0,
                y1: -25.0,
                x2: 50.0,
                y2: 25.0,
            }
        );
    }

    #[test]
    fn test_box_arms_dimension_tool_before_finishing_sketch() {
        let actions = create_box_actions(100.0, 50.0, 25.0, "mm");

        let rectangle = actions
            .iter()
            .position(|a| matches!(a, UiAction::DrawRectangle { .. }))
            .unwrap();
        let dimension = actions
            .iter()
            .position(|a| matches!(a, UiAction::ClickSketchTool { tool } if tool == "Dimension"))
            .unwrap();
        let finish = kinds(&actions).iter().position(|k| *k == "FINISH_SKETCH").unwrap();
        assert!(rectangle < dimension && dimension < finish);
    }

    #[test]
    fn test_cylinder_sketches_on_top_plane() {
        let actions = create_cylinder_actions(30.0, 80.0, "mm");
        assert!(actions.contains(&UiAction::SelectPlane { plane: Plane::Top }));
        assert!(actions.contains(&UiAction::DrawCircle {
            cx: 0.0,
            cy: 0.0,
            radius: 15.0,
        }));
        assert!(actions.contains(&UiAction::FillInput {
            field: "Depth".into(),
            value: "#cylinder_height".into(),
        }));
    }

    #[test]
    fn test_hole_fills_both_parameters() {
        let actions = create_hole_actions(6.0, 10.0, "mm");
        assert!(actions.contains(&UiAction::FillInput {
            field: "Diameter".into(),
            value: "#hole_diameter".into(),
        }));
        assert!(actions.contains(&UiAction::FillInput {
            field: "Depth".into(),
            value: "#hole_depth".into(),
        }));
        assert_eq!(kinds(&actions).last(), Some(&"CLICK_OK"));
    }

    #[test]
    fn test_fillet_variable_value_formatting() {
        let actions = create_fillet_actions(2.5, "mm");
        assert!(actions.contains(&UiAction::CreateVariable {
            name: "fillet_radius".into(),
            value: "2.5".into(),
            unit: "mm".into(),
        }));

        let whole = create_fillet_actions(3.0, "mm");
        assert!(whole.contains(&UiAction::CreateVariable {
            name: "fillet_radius".into(),
            value: "3".into(),
            unit: "mm".into(),
        }));
    }

    #[test]
    fn test_recipes_survive_wire_round_trip() {
        let actions = create_box_actions(100.0, 50.0, 25.0, "mm");
        let json = serde_json::to_value(&actions).unwrap();
        let parsed = cadpilot_core_types::parse_actions(&json).unwrap();
        assert_eq!(parsed, actions);
    }
}
