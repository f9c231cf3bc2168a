//! Declarative selector tables for the host application's UI.
//!
//! Each logical target owns exactly one candidate list, ordered by
//! stability: aria-label first, then data-* attributes, then title, then
//! class/text matches. The host app is not under our control, so these are
//! best-effort heuristics and the expected maintenance point when its DOM
//! changes.

/// Main feature toolbar buttons, by logical name.
pub const TOOLBAR: &[(&str, &[&str])] = &[
    (
        "Sketch",
        &[
            "[aria-label=\"Sketch\"]",
            "[data-feature=\"sketch\"]",
            "[title=\"Sketch\"]",
            "button:has([class*=\"sketch-icon\"])",
            ".toolbar-button[data-command=\"sketch\"]",
        ],
    ),
    (
        "Extrude",
        &[
            "[aria-label=\"Extrude\"]",
            "[data-feature=\"extrude\"]",
            "[title=\"Extrude\"]",
            "button:has([class*=\"extrude-icon\"])",
            ".toolbar-button[data-command=\"extrude\"]",
        ],
    ),
    (
        "Revolve",
        &[
            "[aria-label=\"Revolve\"]",
            "[data-feature=\"revolve\"]",
            "[title=\"Revolve\"]",
            ".toolbar-button[data-command=\"revolve\"]",
        ],
    ),
    (
        "Hole",
        &[
            "[aria-label=\"Hole\"]",
            "[data-feature=\"hole\"]",
            "[title=\"Hole\"]",
            ".toolbar-button[data-command=\"hole\"]",
        ],
    ),
    (
        "Fillet",
        &[
            "[aria-label=\"Fillet\"]",
            "[data-feature=\"fillet\"]",
            "[title=\"Fillet\"]",
            ".toolbar-button[data-command=\"fillet\"]",
        ],
    ),
    (
        "Chamfer",
        &[
            "[aria-label=\"Chamfer\"]",
            "[data-feature=\"chamfer\"]",
            "[title=\"Chamfer\"]",
            ".toolbar-button[data-command=\"chamfer\"]",
        ],
    ),
    (
        "Shell",
        &[
            "[aria-label=\"Shell\"]",
            "[data-feature=\"shell\"]",
            "[title=\"Shell\"]",
            ".toolbar-button[data-command=\"shell\"]",
        ],
    ),
];

/// The plane-selection dialog that opens after starting a sketch.
pub const PLANE_DIALOG: &[&str] = &[
    ".plane-selection-dialog",
    ".plane-picker-dialog",
    "[class*=\"plane-dialog\"]",
    "[data-dialog=\"plane-selection\"]",
];

/// The three named planes offered by the plane-selection dialog.
pub const PLANES: &[(&str, &[&str])] = &[
    (
        "Front",
        &[
            "[data-plane=\"Front\"]",
            "[data-plane-name=\"Front\"]",
            "[aria-label=\"Front plane\"]",
            "[title=\"Front\"]",
            ".plane-item:has-text(\"Front\")",
        ],
    ),
    (
        "Top",
        &[
            "[data-plane=\"Top\"]",
            "[data-plane-name=\"Top\"]",
            "[aria-label=\"Top plane\"]",
            "[title=\"Top\"]",
            ".plane-item:has-text(\"Top\")",
        ],
    ),
    (
        "Right",
        &[
            "[data-plane=\"Right\"]",
            "[data-plane-name=\"Right\"]",
            "[aria-label=\"Right plane\"]",
            "[title=\"Right\"]",
            ".plane-item:has-text(\"Right\")",
        ],
    ),
];

/// Sketch-mode tool buttons, by logical name.
pub const SKETCH_TOOLS: &[(&str, &[&str])] = &[
    (
        "Line",
        &[
            "[aria-label=\"Line\"]",
            "[data-tool=\"line\"]",
            "[title=\"Line\"]",
            ".sketch-tool[data-command=\"line\"]",
        ],
    ),
    (
        "Rectangle",
        &[
            "[aria-label=\"Corner rectangle\"]",
            "[aria-label=\"Rectangle\"]",
            "[data-tool=\"rectangle\"]",
            "[title=\"Corner rectangle\"]",
            ".sketch-tool[data-command=\"rectangle\"]",
        ],
    ),
    (
        "Center Rectangle",
        &[
            "[aria-label=\"Center point rectangle\"]",
            "[data-tool=\"center-rectangle\"]",
            "[title=\"Center point rectangle\"]",
        ],
    ),
    (
        "Circle",
        &[
            "[aria-label=\"Circle\"]",
            "[data-tool=\"circle\"]",
            "[title=\"Circle\"]",
            ".sketch-tool[data-command=\"circle\"]",
        ],
    ),
    (
        "Arc",
        &[
            "[aria-label=\"Arc\"]",
            "[data-tool=\"arc\"]",
            "[title=\"Arc\"]",
            ".sketch-tool[data-command=\"arc\"]",
        ],
    ),
    (
        "Dimension",
        &[
            "[aria-label=\"Dimension\"]",
            "[data-tool=\"dimension\"]",
            "[title=\"Dimension\"]",
            ".sketch-tool[data-command=\"dimension\"]",
        ],
    ),
];

/// The accept control that closes sketch mode.
pub const FINISH_SKETCH: &[&str] = &[
    "[aria-label=\"Finish sketch\"]",
    "[aria-label=\"Accept\"]",
    "[data-action=\"finish-sketch\"]",
    "[title=\"Finish sketch\"]",
    ".accept-button",
    "button.os-accept",
];

/// Any open feature parameter dialog.
pub const FEATURE_DIALOG: &[&str] = &[
    ".feature-dialog",
    ".os-feature-dialog",
    "[class*=\"feature-dialog\"]",
    "[role=\"dialog\"]",
];

/// The explicit confirm control of a dialog.
pub const OK_BUTTON: &[&str] = &[
    "[aria-label=\"OK\"]",
    "[aria-label=\"Accept\"]",
    "[data-action=\"ok\"]",
    ".dialog-ok-button",
    "button.os-accept",
    ".feature-dialog button[type=\"submit\"]",
];

/// The dismiss control of a dialog.
pub const CANCEL_BUTTON: &[&str] = &[
    "[aria-label=\"Cancel\"]",
    "[data-action=\"cancel\"]",
    ".dialog-cancel-button",
    "button.os-cancel",
];

/// The dimension input that appears after selecting a sketch entity.
pub const DIMENSION_INPUT: &[&str] = &[
    "input[aria-label=\"Dimension\"]",
    "input[placeholder*=\"Dimension\"]",
    "input[type=\"number\"]",
    ".dimension-input input",
];

/// Hole dialog parameter inputs.
pub const HOLE_DIAMETER_INPUT: &[&str] = &[
    "input[aria-label=\"Diameter\"]",
    "input[placeholder*=\"Diameter\"]",
    "[data-field=\"diameter\"] input",
    ".hole-diameter input",
];

pub const HOLE_DEPTH_INPUT: &[&str] = &[
    "input[aria-label=\"Depth\"]",
    "input[placeholder*=\"Depth\"]",
    "[data-field=\"depth\"] input",
    ".hole-depth input",
];

/// Fillet dialog radius input.
pub const FILLET_RADIUS_INPUT: &[&str] = &[
    "input[aria-label=\"Radius\"]",
    "input[placeholder*=\"Radius\"]",
    "[data-field=\"radius\"] input",
    ".fillet-radius input",
];

/// Chamfer dialog distance input.
pub const CHAMFER_DISTANCE_INPUT: &[&str] = &[
    "input[aria-label*=\"Distance\"]",
    "input[placeholder*=\"Distance\"]",
    "[data-field=\"distance\"] input",
    ".chamfer-distance input",
];

/// Variable Studio tab and controls.
pub const VARIABLE_STUDIO_TAB: &[&str] = &[
    "[aria-label=\"Variable Studio\"]",
    "[data-tab=\"variable-studio\"]",
    "[title=\"Variable Studio\"]",
    ".tab-item:has-text(\"Variable\")",
    "button[class*=\"variable-studio\"]",
];

pub const ADD_VARIABLE_BUTTON: &[&str] = &[
    "[aria-label=\"Add variable\"]",
    "[aria-label=\"New variable\"]",
    "[data-action=\"add-variable\"]",
    "[title=\"Add variable\"]",
    "button.add-variable",
    ".variable-studio-toolbar button[class*=\"add\"]",
];

pub const VARIABLE_NAME_INPUT: &[&str] = &[
    "input[aria-label=\"Variable name\"]",
    "input[placeholder*=\"Name\"]",
    "input[placeholder*=\"Variable name\"]",
    "input[name=\"variableName\"]",
    ".variable-name-input input",
];

pub const VARIABLE_EXPRESSION_INPUT: &[&str] = &[
    "input[aria-label=\"Expression\"]",
    "input[placeholder*=\"Expression\"]",
    "input[placeholder*=\"Value\"]",
    "input[name=\"expression\"]",
    ".variable-expression-input input",
];

pub const VARIABLE_CREATE_BUTTON: &[&str] = &[
    "[aria-label=\"Create\"]",
    "[aria-label=\"Add\"]",
    "[data-action=\"create-variable\"]",
    ".variable-dialog button[type=\"submit\"]",
];

/// Document tabs.
pub const PART_STUDIO_TAB: &[&str] = &[
    "[aria-label=\"Part Studio 1\"]",
    "[aria-label^=\"Part Studio\"]",
    "[data-tab=\"part-studio\"]",
    ".tab-item:has-text(\"Part Studio\")",
];

pub const ASSEMBLY_TAB: &[&str] = &[
    "[aria-label^=\"Assembly\"]",
    "[data-tab=\"assembly\"]",
    ".tab-item:has-text(\"Assembly\")",
];

/// The 3D graphics viewport canvas.
pub const VIEWPORT_CANVAS: &[&str] = &[
    "canvas.sketch-viewport",
    "canvas.os-viewport",
    "canvas[class*=\"viewport\"]",
    ".graphics-viewport canvas",
    "#graphics-container canvas",
];

/// The 2D sketch canvas, preferred while sketching.
pub const SKETCH_CANVAS: &[&str] = &[
    "canvas.sketch-canvas",
    "canvas[class*=\"sketch\"]",
    ".sketch-viewport canvas",
];

/// Toolbar candidate list for a logical button name.
pub fn toolbar_button(name: &str) -> Option<&'static [&'static str]> {
    lookup(TOOLBAR, name)
}

/// Candidate list for one of the three named planes.
pub fn plane(name: &str) -> Option<&'static [&'static str]> {
    lookup(PLANES, name)
}

/// Sketch tool candidate list for a logical tool name.
pub fn sketch_tool(name: &str) -> Option<&'static [&'static str]> {
    lookup(SKETCH_TOOLS, name)
}

/// Sketch-first canvas candidates, for drawing.
pub fn sketch_canvas_candidates() -> Vec<String> {
    SKETCH_CANVAS
        .iter()
        .chain(VIEWPORT_CANVAS.iter())
        .map(|s| s.to_string())
        .collect()
}

/// Viewport-first canvas candidates, for 3D capture.
pub fn viewport_canvas_candidates() -> Vec<String> {
    VIEWPORT_CANVAS
        .iter()
        .chain(SKETCH_CANVAS.iter())
        .map(|s| s.to_string())
        .collect()
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    name: &str,
) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, candidates)| *candidates)
}
