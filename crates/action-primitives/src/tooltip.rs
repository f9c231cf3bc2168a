//! Floating action tooltip shown while a sequence runs.

use dom_bridge::DomBridge;

use crate::errors::PrimitiveError;

const TOOLTIP_KEY: &str = "cadpilot-action-tooltip";

/// Show (or replace) the action tooltip.
pub async fn show_action_tooltip(
    bridge: &dyn DomBridge,
    message: &str,
) -> Result<(), PrimitiveError> {
    bridge.show_overlay(TOOLTIP_KEY, message).await?;
    Ok(())
}

/// Remove the action tooltip if present.
pub async fn hide_action_tooltip(bridge: &dyn DomBridge) -> Result<(), PrimitiveError> {
    bridge.remove_overlay(TOOLTIP_KEY).await?;
    Ok(())
}
