//! Click primitive - realistic pointer sequence with visual feedback.

use dom_bridge::{DomBridge, DomError, ElementHandle, MouseEvent, MouseEventKind};
use element_locator::sleep_ms;
use tracing::debug;

use crate::errors::PrimitiveError;
use crate::types::ClickOptions;

const HIGHLIGHT_STYLE: &str = "3px solid #00ff88";

/// Click an element the way a user would.
///
/// Scrolls the target into view, optionally holds a transient outline
/// highlight, then fires the full pointer sequence at the element's center
/// followed by the native activation. The highlight is removed on every
/// path, including a failing dispatch.
pub async fn click_element(
    bridge: &dyn DomBridge,
    el: ElementHandle,
    options: ClickOptions,
) -> Result<(), PrimitiveError> {
    bridge.scroll_into_view(el).await?;
    sleep_ms(100).await;

    if options.highlight {
        bridge.set_outline(el, Some(HIGHLIGHT_STYLE)).await?;
        sleep_ms(options.highlight_duration_ms).await;
    }

    let dispatched = dispatch_click_sequence(bridge, el).await;

    if options.highlight {
        // Best effort; the click may have detached the element.
        let _ = bridge.set_outline(el, None).await;
    }
    dispatched?;

    if options.settle_delay_ms > 0 {
        sleep_ms(options.settle_delay_ms).await;
    }

    debug!(element = el.0, "clicked element");
    Ok(())
}

async fn dispatch_click_sequence(
    bridge: &dyn DomBridge,
    el: ElementHandle,
) -> Result<(), DomError> {
    let (cx, cy) = bridge.bounding_box(el).await?.center();

    for kind in [
        MouseEventKind::Enter,
        MouseEventKind::Over,
        MouseEventKind::Down,
        MouseEventKind::Up,
        MouseEventKind::Click,
    ] {
        bridge.dispatch_mouse(el, MouseEvent::new(kind, cx, cy)).await?;
    }

    bridge.native_click(el).await
}
