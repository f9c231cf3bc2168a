//! The DOM bridge trait.

use async_trait::async_trait;

use crate::errors::DomError;
use crate::types::{ElementHandle, KeyEvent, MouseEvent, Rect};

/// Black-box access to the host application's page.
///
/// Visibility contract: an element is visible when it has a non-empty layout
/// box and is not suppressed by `display:none`, `visibility:hidden`, or zero
/// opacity. Implementations fold these rules into [`DomBridge::is_visible`].
#[async_trait]
pub trait DomBridge: Send + Sync {
    /// First element matching `selector`, visible or not.
    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>, DomError>;

    /// All elements matching `selector`, in document order. A bare tag name
    /// ("button", "label") scans by tag.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DomError>;

    /// Element with the given `id` attribute, for label association.
    async fn element_by_id(&self, id: &str) -> Result<Option<ElementHandle>, DomError>;

    /// First focusable input/textarea/contenteditable descendant of `el`.
    async fn editable_descendant(
        &self,
        el: ElementHandle,
    ) -> Result<Option<ElementHandle>, DomError>;

    async fn is_visible(&self, el: ElementHandle) -> Result<bool, DomError>;

    async fn bounding_box(&self, el: ElementHandle) -> Result<Rect, DomError>;

    async fn tag_name(&self, el: ElementHandle) -> Result<String, DomError>;

    async fn attribute(&self, el: ElementHandle, name: &str)
        -> Result<Option<String>, DomError>;

    async fn text_content(&self, el: ElementHandle) -> Result<String, DomError>;

    async fn scroll_into_view(&self, el: ElementHandle) -> Result<(), DomError>;

    async fn dispatch_mouse(&self, el: ElementHandle, event: MouseEvent) -> Result<(), DomError>;

    async fn dispatch_key(&self, el: ElementHandle, event: KeyEvent) -> Result<(), DomError>;

    /// Dispatch a simple bubbling event by name (`input`, `change`).
    async fn dispatch_basic(&self, el: ElementHandle, name: &str) -> Result<(), DomError>;

    /// Invoke the element's native activation (`HTMLElement.click()`).
    async fn native_click(&self, el: ElementHandle) -> Result<(), DomError>;

    async fn focus(&self, el: ElementHandle) -> Result<(), DomError>;

    async fn blur(&self, el: ElementHandle) -> Result<(), DomError>;

    async fn set_value(&self, el: ElementHandle, value: &str) -> Result<(), DomError>;

    async fn value(&self, el: ElementHandle) -> Result<String, DomError>;

    /// Apply or clear a transient outline style used for click feedback.
    async fn set_outline(&self, el: ElementHandle, style: Option<&str>) -> Result<(), DomError>;

    /// Currently focused element, if it is editable or focusable at all.
    async fn active_element(&self) -> Result<Option<ElementHandle>, DomError>;

    /// The document body, the fallback target for key dispatch.
    async fn document_body(&self) -> Result<ElementHandle, DomError>;

    /// Mount or replace a floating overlay (action tooltip) keyed by `key`.
    async fn show_overlay(&self, key: &str, text: &str) -> Result<(), DomError>;

    async fn remove_overlay(&self, key: &str) -> Result<(), DomError>;

    /// Encode the element's canvas pixel buffer as a base64 PNG.
    async fn capture_png(&self, el: ElementHandle) -> Result<String, DomError>;
}
