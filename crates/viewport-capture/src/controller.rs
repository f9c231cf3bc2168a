//! The viewport controller.

use std::sync::Arc;

use dom_bridge::{DomBridge, ElementHandle, MouseEvent, MouseEventKind};
use element_locator::{sleep_ms, wait_for_any, WaitOptions};
use tracing::debug;

use crate::errors::CaptureError;

/// Orbit sensitivity of the host viewport: drag distance per degree.
const PIXELS_PER_DEGREE: f64 = 2.0;

/// Delay between the steps of a drag, so the host registers them as
/// distinct pointer samples.
const DRAG_STEP_DELAY_MS: u64 = 50;

/// Settle time after a rotation before the render is trustworthy.
const ROTATE_SETTLE_MS: u64 = 200;

/// Settle time before reading pixels out of the canvas.
const CAPTURE_SETTLE_MS: u64 = 200;

/// Rotates the 3D viewport and captures it as PNG screenshots.
///
/// Candidate selectors for the canvas are injected, so this crate carries
/// no knowledge of the host application's DOM.
pub struct ViewportController {
    bridge: Arc<dyn DomBridge>,
    canvas_candidates: Vec<String>,
    wait: WaitOptions,
}

impl ViewportController {
    pub fn new(bridge: Arc<dyn DomBridge>, canvas_candidates: Vec<String>) -> Self {
        Self {
            bridge,
            canvas_candidates,
            wait: WaitOptions::default(),
        }
    }

    /// Override the polling profile, mainly to tighten timeouts in tests.
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Rotate the viewport by a simulated orbit drag from the canvas
    /// center. Positive `angle_h` drags right, positive `angle_v` drags up.
    pub async fn rotate(&self, angle_h: f64, angle_v: f64) -> Result<(), CaptureError> {
        let canvas = self.find_canvas().await?;
        let (start_x, start_y) = self.bridge.bounding_box(canvas).await?.center();
        let end_x = start_x + angle_h * PIXELS_PER_DEGREE;
        let end_y = start_y - angle_v * PIXELS_PER_DEGREE;
        debug!(angle_h, angle_v, end_x, end_y, "rotating viewport");

        self.bridge
            .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Down, start_x, start_y))
            .await?;
        sleep_ms(DRAG_STEP_DELAY_MS).await;
        self.bridge
            .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Move, end_x, end_y))
            .await?;
        sleep_ms(DRAG_STEP_DELAY_MS).await;
        self.bridge
            .dispatch_mouse(canvas, MouseEvent::new(MouseEventKind::Up, end_x, end_y))
            .await?;

        sleep_ms(ROTATE_SETTLE_MS).await;
        Ok(())
    }

    /// Capture the current view as a base64 PNG.
    pub async fn capture_frame(&self) -> Result<String, CaptureError> {
        let canvas = self.find_canvas().await?;
        sleep_ms(CAPTURE_SETTLE_MS).await;
        Ok(self.bridge.capture_png(canvas).await?)
    }

    /// Capture eight views of the model: four at a raised tilt, then four
    /// at the mirrored lowered tilt, each quarter turn apart.
    pub async fn capture_eight_angles(&self) -> Result<Vec<String>, CaptureError> {
        let mut frames = Vec::with_capacity(8);

        self.rotate(0.0, 20.0).await?;
        for _ in 0..4 {
            frames.push(self.capture_frame().await?);
            self.rotate(90.0, 0.0).await?;
        }

        self.rotate(0.0, -40.0).await?;
        for _ in 0..4 {
            frames.push(self.capture_frame().await?);
            self.rotate(90.0, 0.0).await?;
        }

        Ok(frames)
    }

    async fn find_canvas(&self) -> Result<ElementHandle, CaptureError> {
        Ok(wait_for_any(self.bridge.as_ref(), &self.canvas_candidates, self.wait).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_bridge::{FakeDom, NodeSpec, RecordedEvent};
    use element_locator::LocatorError;

    fn controller(dom: &FakeDom) -> ViewportController {
        ViewportController::new(
            Arc::new(dom.clone()),
            vec!["canvas.os-viewport".into(), "canvas.sketch-canvas".into()],
        )
        .with_wait_options(
            WaitOptions::default()
                .with_timeout_ms(400)
                .with_interval_ms(20),
        )
    }

    #[tokio::test]
    async fn test_rotate_is_a_three_step_drag() {
        let dom = FakeDom::new();
        let canvas = dom.insert(NodeSpec::new("canvas").selector("canvas.os-viewport"));

        controller(&dom).rotate(45.0, 0.0).await.unwrap();

        assert_eq!(
            dom.events_for(canvas),
            vec![
                RecordedEvent::Mouse(MouseEventKind::Down),
                RecordedEvent::Mouse(MouseEventKind::Move),
                RecordedEvent::Mouse(MouseEventKind::Up),
            ]
        );
    }

    #[tokio::test]
    async fn test_capture_frame_returns_canvas_png() {
        let dom = FakeDom::new();
        dom.insert(NodeSpec::new("canvas").selector("canvas.os-viewport"));
        dom.set_frame_label("front");

        let png = controller(&dom).capture_frame().await.unwrap();
        assert!(!png.is_empty());
    }

    #[tokio::test]
    async fn test_eight_angles_capture_eight_distinct_frames() {
        let dom = FakeDom::new();
        dom.insert(NodeSpec::new("canvas").selector("canvas.os-viewport"));

        let frames = controller(&dom).capture_eight_angles().await.unwrap();

        assert_eq!(frames.len(), 8);
        let mut unique = frames.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 8);
    }

    #[tokio::test]
    async fn test_missing_canvas_reports_candidates() {
        let dom = FakeDom::new();
        let err = controller(&dom).rotate(10.0, 0.0).await.unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Locator(LocatorError::NotFound { .. })
        ));
    }
}
