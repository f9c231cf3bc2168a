//! By-name resolution of buttons and inputs.
//!
//! Fallback for logical targets with no entry in the selector tables.
//! Ordering is fixed: stable attributes first, free-text matching last.

use dom_bridge::{DomBridge, DomError, ElementHandle};
use tracing::debug;

use crate::click::click_element;
use crate::errors::PrimitiveError;
use crate::fill::fill_input;
use crate::types::{ClickOptions, FillOptions};

/// Find a button by human-readable name: aria-label, then title, then
/// data-command/data-action, then case-insensitive text equality over every
/// button on the page.
pub async fn find_button_by_name(
    bridge: &dyn DomBridge,
    name: &str,
) -> Result<ElementHandle, PrimitiveError> {
    let lower = name.to_ascii_lowercase();
    let attribute_queries = [
        format!("[aria-label=\"{}\"]", name),
        format!("[title=\"{}\"]", name),
        format!("[data-command=\"{}\"]", lower),
        format!("[data-action=\"{}\"]", lower),
    ];

    for query in &attribute_queries {
        if let Some(el) = try_query(bridge, query).await? {
            debug!(name, query = query.as_str(), "resolved button by attribute");
            return Ok(el);
        }
    }

    for el in bridge.query_all("button").await? {
        let text = bridge.text_content(el).await.unwrap_or_default();
        if text.trim().eq_ignore_ascii_case(name) {
            debug!(name, "resolved button by text content");
            return Ok(el);
        }
    }

    Err(PrimitiveError::ButtonNotFound(name.to_string()))
}

/// Find and click a button by name.
pub async fn click_button_by_name(
    bridge: &dyn DomBridge,
    name: &str,
    options: ClickOptions,
) -> Result<(), PrimitiveError> {
    let el = find_button_by_name(bridge, name).await?;
    click_element(bridge, el, options).await
}

/// Find an input by human-readable name: aria-label (input, then textarea),
/// placeholder substring, `name` attribute, then label association (for-id
/// or an editable element nested in the label).
pub async fn find_input_by_name(
    bridge: &dyn DomBridge,
    name: &str,
) -> Result<ElementHandle, PrimitiveError> {
    let attribute_queries = [
        format!("input[aria-label=\"{}\"]", name),
        format!("textarea[aria-label=\"{}\"]", name),
        format!("input[placeholder*=\"{}\"]", name),
        format!("input[name=\"{}\"]", name),
    ];

    for query in &attribute_queries {
        if let Some(el) = try_query(bridge, query).await? {
            debug!(name, query = query.as_str(), "resolved input by attribute");
            return Ok(el);
        }
    }

    let lower = name.to_ascii_lowercase();
    for label in bridge.query_all("label").await? {
        let text = bridge.text_content(label).await.unwrap_or_default();
        if !text.to_ascii_lowercase().contains(&lower) {
            continue;
        }
        if let Some(for_id) = bridge.attribute(label, "for").await? {
            if let Some(el) = bridge.element_by_id(&for_id).await? {
                debug!(name, "resolved input via label for-id");
                return Ok(el);
            }
        }
        if let Some(el) = bridge.editable_descendant(label).await? {
            debug!(name, "resolved input nested in label");
            return Ok(el);
        }
    }

    Err(PrimitiveError::InputNotFound(name.to_string()))
}

/// Find and fill an input by name.
pub async fn fill_input_by_name(
    bridge: &dyn DomBridge,
    name: &str,
    value: &str,
) -> Result<(), PrimitiveError> {
    let el = find_input_by_name(bridge, name).await?;
    fill_input(bridge, el, value, FillOptions::default()).await
}

async fn try_query(
    bridge: &dyn DomBridge,
    query: &str,
) -> Result<Option<ElementHandle>, PrimitiveError> {
    match bridge.query(query).await {
        Ok(hit) => Ok(hit),
        Err(DomError::InvalidSelector(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
