//! Multi-step dialog protocols: feature parameter dialogs and the Variable
//! Studio create flow.

use dom_bridge::{DomBridge, ElementHandle, KeyEvent, KeyEventKind};
use cadpilot_core_types::Key;
use element_locator::{wait_for_any, LocatorError, WaitOptions};
use action_primitives::{click_element, fill_input, ClickOptions, FillOptions};
use tracing::{info, warn};

use crate::errors::InterpreterError;
use crate::selectors;

/// Secondary timeout for the confirm control of an already-open dialog.
const CONFIRM_TIMEOUT_MS: u64 = 2000;

/// Open a feature dialog: click its toolbar button, then wait for the
/// dialog itself to render before anyone touches its inputs.
async fn open_feature_dialog(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    button: &str,
) -> Result<(), InterpreterError> {
    let candidates = selectors::toolbar_button(button)
        .ok_or_else(|| InterpreterError::Fatal(format!("unknown toolbar button: {}", button)))?;
    let el = wait_for_any(bridge, candidates, wait).await?;
    click_element(bridge, el, ClickOptions::default()).await?;
    wait_for_any(bridge, selectors::FEATURE_DIALOG, wait).await?;
    Ok(())
}

/// Create a named variable through the Variable Studio.
///
/// Assumes the Variable Studio tab is already active (CLICK_TAB precedes
/// this in well-formed sequences). The expression follows the host app's
/// convention of `value * unit`; a unitless variable passes the value
/// through untouched.
pub(crate) async fn create_variable(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    name: &str,
    value: &str,
    unit: &str,
) -> Result<(), InterpreterError> {
    let add = wait_for_any(bridge, selectors::ADD_VARIABLE_BUTTON, wait).await?;
    click_element(bridge, add, ClickOptions::default()).await?;

    let name_input = wait_for_any(bridge, selectors::VARIABLE_NAME_INPUT, wait).await?;
    fill_input(bridge, name_input, name, FillOptions::default()).await?;

    let expression = if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} * {}", value, unit)
    };
    let expr_input = wait_for_any(bridge, selectors::VARIABLE_EXPRESSION_INPUT, wait).await?;
    fill_input(bridge, expr_input, &expression, FillOptions::default()).await?;

    info!(name, expression = %expression, "created variable");
    confirm(bridge, wait, selectors::VARIABLE_CREATE_BUTTON, Some(expr_input)).await
}

/// Open the hole dialog from the toolbar, fill its parameters and confirm
/// it. Empty parameters leave the dialog's defaults in place.
pub(crate) async fn create_hole(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    diameter: &str,
    depth: &str,
) -> Result<(), InterpreterError> {
    open_feature_dialog(bridge, wait, "Hole").await?;

    let mut last_field = None;
    if !diameter.is_empty() {
        let input = wait_for_any(bridge, selectors::HOLE_DIAMETER_INPUT, wait).await?;
        fill_input(bridge, input, diameter, FillOptions::default()).await?;
        last_field = Some(input);
    }
    if !depth.is_empty() {
        let input = wait_for_any(bridge, selectors::HOLE_DEPTH_INPUT, wait).await?;
        fill_input(bridge, input, depth, FillOptions::default()).await?;
        last_field = Some(input);
    }

    confirm(bridge, wait, selectors::OK_BUTTON, last_field).await
}

/// Open the fillet dialog from the toolbar, fill the radius and confirm it.
pub(crate) async fn create_fillet(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    radius: &str,
) -> Result<(), InterpreterError> {
    open_feature_dialog(bridge, wait, "Fillet").await?;

    let mut last_field = None;
    if !radius.is_empty() {
        let input = wait_for_any(bridge, selectors::FILLET_RADIUS_INPUT, wait).await?;
        fill_input(bridge, input, radius, FillOptions::default()).await?;
        last_field = Some(input);
    }

    confirm(bridge, wait, selectors::OK_BUTTON, last_field).await
}

/// Open the chamfer dialog from the toolbar, fill the distance and confirm
/// it.
pub(crate) async fn create_chamfer(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    distance: &str,
) -> Result<(), InterpreterError> {
    open_feature_dialog(bridge, wait, "Chamfer").await?;

    let mut last_field = None;
    if !distance.is_empty() {
        let input = wait_for_any(bridge, selectors::CHAMFER_DISTANCE_INPUT, wait).await?;
        fill_input(bridge, input, distance, FillOptions::default()).await?;
        last_field = Some(input);
    }

    confirm(bridge, wait, selectors::OK_BUTTON, last_field).await
}

/// Confirm a dialog whose inputs were just filled.
///
/// Some dialog variants render no explicit confirm control and commit on
/// Enter instead, so a missing button within the (shortened) confirm timeout
/// degrades to an Enter keydown on the last-filled field. Without a filled
/// field to fall back on, and on any other locator failure, the error
/// propagates.
async fn confirm(
    bridge: &dyn DomBridge,
    wait: WaitOptions,
    candidates: &[&str],
    last_field: Option<ElementHandle>,
) -> Result<(), InterpreterError> {
    let confirm_ms = (wait.timeout.as_millis() as u64).min(CONFIRM_TIMEOUT_MS);
    match wait_for_any(bridge, candidates, wait.with_timeout_ms(confirm_ms)).await {
        Ok(button) => {
            click_element(bridge, button, ClickOptions::default()).await?;
            Ok(())
        }
        Err(err @ LocatorError::NotFound { .. }) => match last_field {
            Some(field) => {
                warn!("no confirm button, committing with Enter");
                let key = Key::Enter;
                bridge
                    .dispatch_key(
                        field,
                        KeyEvent::new(KeyEventKind::Down, key.dom_key(), key.key_code()),
                    )
                    .await?;
                Ok(())
            }
            None => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}
