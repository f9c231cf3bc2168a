//! Sketch-mode geometry: canvas clicks and the dimension input.

use cadpilot_core_types::Key;
use dom_bridge::{DomBridge, ElementHandle, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use element_locator::{sleep_ms, wait_for_any, WaitOptions};
use action_primitives::{fill_input, FillOptions};
use tracing::debug;

use crate::errors::InterpreterError;
use crate::selectors;

/// Pause between the stages of a canvas drag.
const DRAG_STEP_DELAY_MS: u64 = 50;

/// Pause after placing a circle's center before the radius click.
const RADIUS_CLICK_DELAY_MS: u64 = 100;

/// One drag across the canvas: press at corner 1, move to corner 2 and
/// release there, with a trailing click for tools that listen for it.
pub(crate) async fn draw_rectangle(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    corner1: (f64, f64),
    corner2: (f64, f64),
) -> Result<(), InterpreterError> {
    let canvas = find_sketch_canvas(bridge, wait).await?;
    let (start_x, start_y) = to_client(bridge, canvas, corner1).await?;
    let (end_x, end_y) = to_client(bridge, canvas, corner2).await?;
    debug!(start_x, start_y, end_x, end_y, "rectangle drag");

    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Down, start_x, start_y))
        .await?;
    sleep_ms(DRAG_STEP_DELAY_MS).await;
    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Move, end_x, end_y))
        .await?;
    sleep_ms(DRAG_STEP_DELAY_MS).await;
    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Up, end_x, end_y))
        .await?;
    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Click, end_x, end_y))
        .await?;
    Ok(())
}

/// Press-release at the center, then a single click on the perimeter at
/// `radius` along the x axis.
pub(crate) async fn draw_circle(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    center: (f64, f64),
    radius: f64,
) -> Result<(), InterpreterError> {
    let canvas = find_sketch_canvas(bridge, wait).await?;
    let (center_x, center_y) = to_client(bridge, canvas, center).await?;
    let edge_x = center_x + radius;
    debug!(center_x, center_y, radius, "circle placement");

    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Down, center_x, center_y))
        .await?;
    sleep_ms(DRAG_STEP_DELAY_MS).await;
    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Up, center_x, center_y))
        .await?;
    sleep_ms(RADIUS_CLICK_DELAY_MS).await;
    bridge
        .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Click, edge_x, center_y))
        .await?;
    Ok(())
}

/// Fill the dimension input that appears after selecting an entity with the
/// dimension tool, then commit with Enter.
pub(crate) async fn set_dimension(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    value: &str,
) -> Result<(), InterpreterError> {
    let input = wait_for_any(bridge, selectors::DIMENSION_INPUT, wait).await?;
    fill_input(bridge, input, value, FillOptions::default()).await?;

    let key = Key::Enter;
    for kind in [KeyEventKind::Down, KeyEventKind::Up] {
        bridge
            .dispatch_key(input, KeyEvent::new(kind, key.dom_key(), key.key_code()))
            .await?;
    }
    Ok(())
}

async fn find_sketch_canvas(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
) -> Result<ElementHandle, InterpreterError> {
    Ok(wait_for_any(bridge, &selectors::sketch_canvas_candidates(), wait).await?)
}

/// Map sketch coordinates to client coordinates.
///
/// Sketch coordinates are y-up with the origin at the canvas center; client
/// coordinates are y-down with the origin at the page corner.
async fn to_client(
    bridge: &dyn DomBridge,
    canvas: ElementHandle,
    point: (f64, f64),
) -> Result<(f64, f64), InterpreterError> {
    let (center_x, center_y) = bridge.bounding_box(canvas).await?.center();
    Ok((center_x + point.0, center_y - point.1))
}
