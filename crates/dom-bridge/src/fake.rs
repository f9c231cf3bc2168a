//! In-memory DOM fake for tests.
//!
//! Matching is by registered selector string, not a real CSS engine: tests
//! register an element under the exact query strings the code under test
//! will try, which is all the black-box polling contract needs. Bare tag
//! names scan by tag, for the by-name fallbacks that walk every `button` or
//! `label` on the page.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;

use crate::bridge::DomBridge;
use crate::errors::DomError;
use crate::types::{ElementHandle, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind, Rect};

/// Everything the fake records about interactions with one element.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    Mouse(MouseEventKind),
    Key { kind: KeyEventKind, key: String },
    Basic(String),
    Focus,
    Blur,
    NativeClick,
    SetValue(String),
    ScrollIntoView,
}

/// Builder for one fake element.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    tag: String,
    selectors: Vec<String>,
    attrs: HashMap<String, String>,
    text: String,
    visible: bool,
    rect: Rect,
    parent: Option<ElementHandle>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            selectors: Vec::new(),
            attrs: HashMap::new(),
            text: String::new(),
            visible: true,
            rect: Rect::new(0.0, 0.0, 40.0, 20.0),
            parent: None,
        }
    }

    /// Register the node under a query string.
    pub fn selector(mut self, selector: &str) -> Self {
        self.selectors.push(selector.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn parent(mut self, parent: ElementHandle) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    value: String,
    visible: bool,
    rect: Rect,
    outline: Option<String>,
    parent: Option<u64>,
    removed: bool,
}

impl Node {
    fn is_editable(&self) -> bool {
        self.tag == "input" || self.tag == "textarea" || self.attrs.contains_key("contenteditable")
    }
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<u64, Node>,
    order: Vec<u64>,
    selector_index: HashMap<String, Vec<u64>>,
    invalid_selectors: Vec<String>,
    overlays: HashMap<String, String>,
    active: Option<u64>,
    events: Vec<(u64, RecordedEvent)>,
    next_id: u64,
    frame_label: String,
    capture_count: u64,
    body: u64,
}

/// Shared-handle fake page; clones observe the same state.
#[derive(Clone)]
pub struct FakeDom {
    inner: Arc<Mutex<Inner>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let dom = Self {
            inner: Arc::new(Mutex::new(Inner {
                frame_label: "frame".to_string(),
                ..Inner::default()
            })),
        };
        let body = dom.insert(NodeSpec::new("body").selector("body"));
        dom.inner.lock().body = body.0;
        dom
    }

    pub fn insert(&self, spec: NodeSpec) -> ElementHandle {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.nodes.insert(
            id,
            Node {
                tag: spec.tag,
                attrs: spec.attrs,
                text: spec.text,
                value: String::new(),
                visible: spec.visible,
                rect: spec.rect,
                outline: None,
                parent: spec.parent.map(|p| p.0),
                removed: false,
            },
        );
        inner.order.push(id);
        for selector in spec.selectors {
            inner.selector_index.entry(selector).or_default().push(id);
        }
        ElementHandle(id)
    }

    /// Insert the node after a delay, for polling tests.
    pub fn insert_after(&self, delay: Duration, spec: NodeSpec) {
        let dom = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dom.insert(spec);
        });
    }

    pub fn remove(&self, el: ElementHandle) {
        if let Some(node) = self.inner.lock().nodes.get_mut(&el.0) {
            node.removed = true;
        }
    }

    /// Remove the node after a delay, for disappearance tests.
    pub fn remove_after(&self, delay: Duration, el: ElementHandle) {
        let dom = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dom.remove(el);
        });
    }

    pub fn set_visible(&self, el: ElementHandle, visible: bool) {
        if let Some(node) = self.inner.lock().nodes.get_mut(&el.0) {
            node.visible = visible;
        }
    }

    /// Treat a query string as unparsable, as the real selector engine does
    /// for engine-specific syntax.
    pub fn mark_invalid_selector(&self, selector: &str) {
        self.inner
            .lock()
            .invalid_selectors
            .push(selector.to_string());
    }

    pub fn events_for(&self, el: ElementHandle) -> Vec<RecordedEvent> {
        self.inner
            .lock()
            .events
            .iter()
            .filter(|(id, _)| *id == el.0)
            .map(|(_, ev)| ev.clone())
            .collect()
    }

    /// Values written via `set_value`, in order, clears included.
    pub fn value_history(&self, el: ElementHandle) -> Vec<String> {
        self.events_for(el)
            .into_iter()
            .filter_map(|ev| match ev {
                RecordedEvent::SetValue(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn overlay_text(&self, key: &str) -> Option<String> {
        self.inner.lock().overlays.get(key).cloned()
    }

    pub fn active(&self) -> Option<ElementHandle> {
        self.inner.lock().active.map(ElementHandle)
    }

    pub fn outline(&self, el: ElementHandle) -> Option<String> {
        self.inner
            .lock()
            .nodes
            .get(&el.0)
            .and_then(|n| n.outline.clone())
    }

    pub fn set_frame_label(&self, label: &str) {
        self.inner.lock().frame_label = label.to_string();
    }

    fn record(&self, el: ElementHandle, event: RecordedEvent) {
        self.inner.lock().events.push((el.0, event));
    }

    fn with_live_node<T>(
        &self,
        el: ElementHandle,
        f: impl FnOnce(&mut Node) -> T,
    ) -> Result<T, DomError> {
        let mut inner = self.inner.lock();
        match inner.nodes.get_mut(&el.0) {
            Some(node) if !node.removed => Ok(f(node)),
            _ => Err(DomError::Detached(format!("node {}", el.0))),
        }
    }
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

fn is_tag_scan(selector: &str) -> bool {
    !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric())
}

#[async_trait]
impl DomBridge for FakeDom {
    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>, DomError> {
        let inner = self.inner.lock();
        if inner.invalid_selectors.iter().any(|s| s == selector) {
            return Err(DomError::InvalidSelector(selector.to_string()));
        }
        if is_tag_scan(selector) {
            let tag = selector.to_ascii_lowercase();
            for id in &inner.order {
                if let Some(node) = inner.nodes.get(id) {
                    if !node.removed && node.tag == tag {
                        return Ok(Some(ElementHandle(*id)));
                    }
                }
            }
            return Ok(None);
        }
        let hit = inner
            .selector_index
            .get(selector)
            .and_then(|ids| {
                ids.iter()
                    .find(|id| inner.nodes.get(id).map(|n| !n.removed).unwrap_or(false))
            })
            .copied();
        Ok(hit.map(ElementHandle))
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DomError> {
        let inner = self.inner.lock();
        if inner.invalid_selectors.iter().any(|s| s == selector) {
            return Err(DomError::InvalidSelector(selector.to_string()));
        }
        if is_tag_scan(selector) {
            let tag = selector.to_ascii_lowercase();
            return Ok(inner
                .order
                .iter()
                .filter(|id| {
                    inner
                        .nodes
                        .get(id)
                        .map(|n| !n.removed && n.tag == tag)
                        .unwrap_or(false)
                })
                .map(|id| ElementHandle(*id))
                .collect());
        }
        Ok(inner
            .selector_index
            .get(selector)
            .map(|ids| {
                ids.iter()
                    .filter(|id| inner.nodes.get(id).map(|n| !n.removed).unwrap_or(false))
                    .map(|id| ElementHandle(*id))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn element_by_id(&self, id: &str) -> Result<Option<ElementHandle>, DomError> {
        let inner = self.inner.lock();
        for node_id in &inner.order {
            if let Some(node) = inner.nodes.get(node_id) {
                if !node.removed && node.attrs.get("id").map(String::as_str) == Some(id) {
                    return Ok(Some(ElementHandle(*node_id)));
                }
            }
        }
        Ok(None)
    }

    async fn editable_descendant(
        &self,
        el: ElementHandle,
    ) -> Result<Option<ElementHandle>, DomError> {
        let inner = self.inner.lock();
        for id in &inner.order {
            let Some(node) = inner.nodes.get(id) else {
                continue;
            };
            if node.removed || !node.is_editable() {
                continue;
            }
            let mut parent = node.parent;
            while let Some(pid) = parent {
                if pid == el.0 {
                    return Ok(Some(ElementHandle(*id)));
                }
                parent = inner.nodes.get(&pid).and_then(|n| n.parent);
            }
        }
        Ok(None)
    }

    async fn is_visible(&self, el: ElementHandle) -> Result<bool, DomError> {
        self.with_live_node(el, |node| node.visible && !node.rect.is_empty())
    }

    async fn bounding_box(&self, el: ElementHandle) -> Result<Rect, DomError> {
        self.with_live_node(el, |node| node.rect)
    }

    async fn tag_name(&self, el: ElementHandle) -> Result<String, DomError> {
        self.with_live_node(el, |node| node.tag.clone())
    }

    async fn attribute(
        &self,
        el: ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DomError> {
        self.with_live_node(el, |node| node.attrs.get(name).cloned())
    }

    async fn text_content(&self, el: ElementHandle) -> Result<String, DomError> {
        self.with_live_node(el, |node| node.text.clone())
    }

    async fn scroll_into_view(&self, el: ElementHandle) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.record(el, RecordedEvent::ScrollIntoView);
        Ok(())
    }

    async fn dispatch_mouse(&self, el: ElementHandle, event: MouseEvent) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.record(el, RecordedEvent::Mouse(event.kind));
        Ok(())
    }

    async fn dispatch_key(&self, el: ElementHandle, event: KeyEvent) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.record(
            el,
            RecordedEvent::Key {
                kind: event.kind,
                key: event.key,
            },
        );
        Ok(())
    }

    async fn dispatch_basic(&self, el: ElementHandle, name: &str) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.record(el, RecordedEvent::Basic(name.to_string()));
        Ok(())
    }

    async fn native_click(&self, el: ElementHandle) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.record(el, RecordedEvent::NativeClick);
        Ok(())
    }

    async fn focus(&self, el: ElementHandle) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        self.inner.lock().active = Some(el.0);
        self.record(el, RecordedEvent::Focus);
        Ok(())
    }

    async fn blur(&self, el: ElementHandle) -> Result<(), DomError> {
        self.with_live_node(el, |_| ())?;
        {
            let mut inner = self.inner.lock();
            if inner.active == Some(el.0) {
                inner.active = None;
            }
        }
        self.record(el, RecordedEvent::Blur);
        Ok(())
    }

    async fn set_value(&self, el: ElementHandle, value: &str) -> Result<(), DomError> {
        self.with_live_node(el, |node| node.value = value.to_string())?;
        self.record(el, RecordedEvent::SetValue(value.to_string()));
        Ok(())
    }

    async fn value(&self, el: ElementHandle) -> Result<String, DomError> {
        self.with_live_node(el, |node| node.value.clone())
    }

    async fn set_outline(&self, el: ElementHandle, style: Option<&str>) -> Result<(), DomError> {
        self.with_live_node(el, |node| node.outline = style.map(str::to_string))
    }

    async fn active_element(&self) -> Result<Option<ElementHandle>, DomError> {
        Ok(self.inner.lock().active.map(ElementHandle))
    }

    async fn document_body(&self) -> Result<ElementHandle, DomError> {
        Ok(ElementHandle(self.inner.lock().body))
    }

    async fn show_overlay(&self, key: &str, text: &str) -> Result<(), DomError> {
        self.inner
            .lock()
            .overlays
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    async fn remove_overlay(&self, key: &str) -> Result<(), DomError> {
        self.inner.lock().overlays.remove(key);
        Ok(())
    }

    async fn capture_png(&self, el: ElementHandle) -> Result<String, DomError> {
        self.with_live_node(el, |_| ())?;
        let mut inner = self.inner.lock();
        inner.capture_count += 1;
        let payload = format!("{}#{}", inner.frame_label, inner.capture_count);
        Ok(STANDARD.encode(payload.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_by_selector_and_tag() {
        let dom = FakeDom::new();
        let btn = dom.insert(
            NodeSpec::new("button")
                .selector("[aria-label=\"Sketch\"]")
                .text("Sketch"),
        );
        assert_eq!(dom.query("[aria-label=\"Sketch\"]").await.unwrap(), Some(btn));
        assert_eq!(dom.query("[aria-label=\"Extrude\"]").await.unwrap(), None);
        assert_eq!(dom.query_all("button").await.unwrap(), vec![btn]);
    }

    #[tokio::test]
    async fn test_invalid_selector_errors() {
        let dom = FakeDom::new();
        dom.mark_invalid_selector("button:has-text(\"Sketch\")");
        assert!(matches!(
            dom.query("button:has-text(\"Sketch\")").await,
            Err(DomError::InvalidSelector(_))
        ));
    }

    #[tokio::test]
    async fn test_removed_node_is_detached() {
        let dom = FakeDom::new();
        let el = dom.insert(NodeSpec::new("div").selector("#gone"));
        dom.remove(el);
        assert_eq!(dom.query("#gone").await.unwrap(), None);
        assert!(matches!(
            dom.native_click(el).await,
            Err(DomError::Detached(_))
        ));
    }

    #[tokio::test]
    async fn test_visibility_needs_nonempty_box() {
        let dom = FakeDom::new();
        let flat = dom.insert(
            NodeSpec::new("div")
                .selector(".flat")
                .rect(Rect::new(0.0, 0.0, 0.0, 0.0)),
        );
        let hidden = dom.insert(NodeSpec::new("div").selector(".hidden").visible(false));
        assert!(!dom.is_visible(flat).await.unwrap());
        assert!(!dom.is_visible(hidden).await.unwrap());
    }

    #[tokio::test]
    async fn test_editable_descendant() {
        let dom = FakeDom::new();
        let wrapper = dom.insert(NodeSpec::new("div").selector(".field"));
        let input = dom.insert(NodeSpec::new("input").parent(wrapper));
        assert_eq!(dom.editable_descendant(wrapper).await.unwrap(), Some(input));
    }

    #[tokio::test]
    async fn test_capture_counts_frames() {
        let dom = FakeDom::new();
        let canvas = dom.insert(NodeSpec::new("canvas").selector("canvas.os-viewport"));
        let a = dom.capture_png(canvas).await.unwrap();
        let b = dom.capture_png(canvas).await.unwrap();
        assert_ne!(a, b);
    }
}
