//! Per-action protocols and the dispatch trait.

use std::sync::Arc;

use async_trait::async_trait;
use cadpilot_core_types::{Key, UiAction};
use dom_bridge::{DomBridge, ElementHandle, KeyEvent, KeyEventKind};
use element_locator::{sleep_ms, wait_for_any, wait_for_element, WaitOptions};
use action_primitives::{click_button_by_name, click_element, fill_input_by_name, ClickOptions};
use tracing::{debug, info};

use crate::dialogs;
use crate::errors::InterpreterError;
use crate::selectors;
use crate::sketch;

/// Dialogs render faster than feature regeneration, so they get a shorter
/// wait than plain element lookups.
const DIALOG_TIMEOUT_MS: u64 = 3000;

/// Executes one abstract action against the page.
#[async_trait]
pub trait ActionInterpreter: Send + Sync {
    async fn run(&self, action: &UiAction) -> Result<(), InterpreterError>;
}

/// The Onshape mapping: one protocol of locator and primitive calls per
/// action variant, driven by the tables in [`crate::selectors`].
pub struct OnshapeInterpreter {
    bridge: Arc<dyn DomBridge>,
    wait: WaitOptions,
}

impl OnshapeInterpreter {
    pub fn new(bridge: Arc<dyn DomBridge>) -> Self {
        Self {
            bridge,
            wait: WaitOptions::default(),
        }
    }

    /// Override the polling profile, mainly to tighten timeouts in tests.
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    fn dialog_wait(&self) -> WaitOptions {
        let dialog_ms = (self.wait.timeout.as_millis() as u64).min(DIALOG_TIMEOUT_MS);
        self.wait.with_timeout_ms(dialog_ms)
    }

    async fn click_named_button(&self, name: &str) -> Result<(), InterpreterError> {
        if let Some(candidates) = selectors::toolbar_button(name) {
            let el = wait_for_any(self.bridge.as_ref(), candidates, self.wait).await?;
            click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
        } else {
            debug!(name, "button not in selector tables, resolving by name");
            click_button_by_name(self.bridge.as_ref(), name, ClickOptions::default()).await?;
        }
        Ok(())
    }

    async fn select_plane(&self, name: &str) -> Result<(), InterpreterError> {
        wait_for_any(self.bridge.as_ref(), selectors::PLANE_DIALOG, self.wait).await?;
        // Let the dialog's entry animation finish before probing planes.
        sleep_ms(200).await;

        let candidates = selectors::plane(name)
            .ok_or_else(|| InterpreterError::Fatal(format!("unknown plane: {}", name)))?;
        let el = wait_for_any(self.bridge.as_ref(), candidates, self.dialog_wait()).await?;
        click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
        Ok(())
    }

    async fn click_sketch_tool(&self, name: &str) -> Result<(), InterpreterError> {
        if let Some(candidates) = selectors::sketch_tool(name) {
            let el = wait_for_any(self.bridge.as_ref(), candidates, self.wait).await?;
            click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
        } else {
            click_button_by_name(self.bridge.as_ref(), name, ClickOptions::default()).await?;
        }
        Ok(())
    }

    async fn focus_input(&self, selector: &str) -> Result<(), InterpreterError> {
        let el = wait_for_element(self.bridge.as_ref(), selector, self.wait).await?;
        let target = self.editable_target(el).await?.ok_or_else(|| {
            InterpreterError::NoFocusableInput(selector.to_string())
        })?;
        self.bridge.focus(target).await?;
        Ok(())
    }

    /// The element itself if editable, otherwise its first editable
    /// descendant.
    async fn editable_target(
        &self,
        el: ElementHandle,
    ) -> Result<Option<ElementHandle>, InterpreterError> {
        let tag = self.bridge.tag_name(el).await?;
        if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
            return Ok(Some(el));
        }
        Ok(self.bridge.editable_descendant(el).await?)
    }

    async fn type_value(&self, value: &str) -> Result<(), InterpreterError> {
        let el = self
            .bridge
            .active_element()
            .await?
            .ok_or(InterpreterError::NoActiveInput)?;
        self.bridge.set_value(el, value).await?;
        self.bridge.dispatch_basic(el, "input").await?;
        self.bridge.dispatch_basic(el, "change").await?;
        Ok(())
    }

    /// Key events go to the focused element, or the body when nothing
    /// holds focus.
    async fn press_key(&self, key: Key) -> Result<(), InterpreterError> {
        let target = match self.bridge.active_element().await? {
            Some(el) => el,
            None => self.bridge.document_body().await?,
        };
        for kind in [KeyEventKind::Down, KeyEventKind::Press, KeyEventKind::Up] {
            self.bridge
                .dispatch_key(target, KeyEvent::new(kind, key.dom_key(), key.key_code()))
                .await?;
        }
        Ok(())
    }

    /// Geometry selections take the collaborator's selector as-is, falling
    /// back to treating it as an entity id.
    async fn select_entity(&self, selector: &str) -> Result<(), InterpreterError> {
        let candidates = [
            selector.to_string(),
            format!("[data-entity-id=\"{}\"]", selector),
            format!("[data-id=\"{}\"]", selector),
        ];
        let el = wait_for_any(self.bridge.as_ref(), &candidates, self.wait).await?;
        click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
        Ok(())
    }

    async fn click_fixed(&self, candidates: &[&str]) -> Result<(), InterpreterError> {
        let el = wait_for_any(self.bridge.as_ref(), candidates, self.dialog_wait()).await?;
        click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
        Ok(())
    }

    async fn click_tab(&self, tab: &str) -> Result<(), InterpreterError> {
        let lower = tab.to_ascii_lowercase();
        let candidates = if lower.contains("variable") {
            Some(selectors::VARIABLE_STUDIO_TAB)
        } else if lower.contains("assembly") {
            Some(selectors::ASSEMBLY_TAB)
        } else if lower.contains("part") {
            Some(selectors::PART_STUDIO_TAB)
        } else {
            None
        };

        match candidates {
            Some(candidates) => self.click_fixed(candidates).await,
            None => {
                // Tabs are not always rendered as buttons, so resolve by
                // attribute rather than by role.
                let fallback = [
                    format!("[aria-label=\"{}\"]", tab),
                    format!("[aria-label*=\"{}\"]", tab),
                    format!("[title=\"{}\"]", tab),
                    format!("[data-tab=\"{}\"]", lower),
                ];
                let el =
                    wait_for_any(self.bridge.as_ref(), &fallback, self.dialog_wait()).await?;
                click_element(self.bridge.as_ref(), el, ClickOptions::default()).await?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl ActionInterpreter for OnshapeInterpreter {
    async fn run(&self, action: &UiAction) -> Result<(), InterpreterError> {
        info!(action = action.kind(), "running action");
        let bridge = self.bridge.as_ref();

        match action {
            UiAction::ClickButton { button } => self.click_named_button(button).await,
            UiAction::SelectPlane { plane } => self.select_plane(plane.name()).await,
            UiAction::ClickSketchTool { tool } => self.click_sketch_tool(tool).await,
            UiAction::DrawRectangle { x1, y1, x2, y2 } => {
                sketch::draw_rectangle(bridge, self.wait, (*x1, *y1), (*x2, *y2)).await
            }
            UiAction::DrawCircle { cx, cy, radius } => {
                sketch::draw_circle(bridge, self.wait, (*cx, *cy), *radius).await
            }
            UiAction::SetDimension { value } => {
                sketch::set_dimension(bridge, self.dialog_wait(), value).await
            }
            UiAction::FillInput { field, value } => {
                fill_input_by_name(bridge, field, value).await?;
                Ok(())
            }
            UiAction::FocusInput { selector } => self.focus_input(selector).await,
            UiAction::TypeValue { value } => self.type_value(value).await,
            UiAction::PressKey { key } => self.press_key(*key).await,
            UiAction::SelectFace { selector } | UiAction::SelectEdge { selector } => {
                self.select_entity(selector).await
            }
            UiAction::CreateHole { diameter, depth } => {
                dialogs::create_hole(bridge, self.dialog_wait(), diameter, depth).await
            }
            UiAction::CreateFillet { radius } => {
                dialogs::create_fillet(bridge, self.dialog_wait(), radius).await
            }
            UiAction::CreateChamfer { distance } => {
                dialogs::create_chamfer(bridge, self.dialog_wait(), distance).await
            }
            UiAction::ClickOk => self.click_fixed(selectors::OK_BUTTON).await,
            UiAction::ClickCancel => self.click_fixed(selectors::CANCEL_BUTTON).await,
            UiAction::FinishSketch => self.click_fixed(selectors::FINISH_SKETCH).await,
            UiAction::CreateVariable { name, value, unit } => {
                dialogs::create_variable(bridge, self.dialog_wait(), name, value, unit).await
            }
            UiAction::ClickTab { tab } => self.click_tab(tab).await,
            UiAction::Wait { ms } => {
                sleep_ms(*ms).await;
                Ok(())
            }
        }
    }
}
