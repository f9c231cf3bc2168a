//! Fill primitive - set an input's value with the event choreography the
//! host application's frameworks listen for.

use dom_bridge::{DomBridge, ElementHandle, KeyEvent};
use element_locator::sleep_ms;
use tracing::debug;

use crate::errors::PrimitiveError;
use crate::types::FillOptions;

/// Fill an input element.
///
/// Order matters: clear-then-set, always followed by both `input` and
/// `change` (plus a synthetic key-up), so frameworks watching any of the
/// three pick up the new value. Ends with a blur to trigger commit handlers.
pub async fn fill_input(
    bridge: &dyn DomBridge,
    el: ElementHandle,
    value: &str,
    options: FillOptions,
) -> Result<(), PrimitiveError> {
    bridge.focus(el).await?;
    sleep_ms(50).await;

    if options.clear_first {
        bridge.set_value(el, "").await?;
        bridge.dispatch_basic(el, "input").await?;
    }

    bridge.set_value(el, value).await?;
    bridge.dispatch_basic(el, "input").await?;
    bridge.dispatch_basic(el, "change").await?;
    bridge.dispatch_key(el, KeyEvent::bare_keyup()).await?;

    sleep_ms(options.delay_ms).await;
    bridge.blur(el).await?;

    debug!(element = el.0, value, "filled input");
    Ok(())
}
