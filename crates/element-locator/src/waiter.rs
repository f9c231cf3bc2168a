//! Polling waits with candidate fallback.

use std::future::Future;
use std::time::Duration;

use dom_bridge::{DomBridge, DomError, ElementHandle};
use tokio::time::{sleep, Instant};
use tracing::{debug, trace, warn};

/// Per-call tuning for a polling wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Maximum time to wait.
    pub timeout: Duration,
    /// Polling interval.
    pub interval: Duration,
    /// Require the element to be visible, not merely present.
    pub visible: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            interval: Duration::from_millis(100),
            visible: true,
        }
    }
}

impl WaitOptions {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval = Duration::from_millis(interval_ms);
        self
    }

    pub fn present_only(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Fixed delay between protocol steps.
pub async fn sleep_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

/// Wait for a single selector to match.
pub async fn wait_for_element(
    bridge: &dyn DomBridge,
    selector: &str,
    options: WaitOptions,
) -> Result<ElementHandle, crate::LocatorError> {
    wait_for_any(bridge, &[selector], options).await
}

/// Wait for any of the candidate selectors to match, in priority order.
///
/// Each poll tries every candidate before sleeping, so a lower-priority
/// candidate matching a visible element wins over a higher-priority one that
/// only matches something invisible. Invalid candidates are skipped.
pub async fn wait_for_any<S: AsRef<str>>(
    bridge: &dyn DomBridge,
    candidates: &[S],
    options: WaitOptions,
) -> Result<ElementHandle, crate::LocatorError> {
    let deadline = Instant::now() + options.timeout;

    loop {
        for candidate in candidates {
            let selector = candidate.as_ref();
            match probe(bridge, selector, options.visible).await? {
                Some(el) => {
                    debug!(selector, "found element");
                    return Ok(el);
                }
                None => trace!(selector, "no match yet"),
            }
        }

        if Instant::now() >= deadline {
            return Err(crate::LocatorError::NotFound {
                candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
                timeout_ms: options.timeout.as_millis() as u64,
            });
        }

        sleep(options.interval).await;
    }
}

/// Wait for a selector to stop matching.
pub async fn wait_for_gone(
    bridge: &dyn DomBridge,
    selector: &str,
    options: WaitOptions,
) -> Result<(), crate::LocatorError> {
    let deadline = Instant::now() + options.timeout;

    loop {
        let present = match bridge.query(selector).await {
            Ok(hit) => hit.is_some(),
            Err(DomError::InvalidSelector(_)) => false,
            Err(err) => return Err(err.into()),
        };
        if !present {
            debug!(selector, "element disappeared");
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(crate::LocatorError::StillPresent {
                selector: selector.to_string(),
                timeout_ms: options.timeout.as_millis() as u64,
            });
        }

        sleep(options.interval).await;
    }
}

/// Generic poll-until-true utility over the page.
pub async fn wait_for_condition<F, Fut>(
    condition: F,
    description: &str,
    options: WaitOptions,
) -> Result<(), crate::LocatorError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + options.timeout;

    loop {
        if condition().await {
            debug!(description, "condition met");
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(crate::LocatorError::ConditionTimeout {
                description: description.to_string(),
                timeout_ms: options.timeout.as_millis() as u64,
            });
        }

        sleep(options.interval).await;
    }
}

/// One probe of one candidate. `Ok(None)` means no acceptable match this
/// round; invalid selectors and handles that vanish mid-check count as no
/// match rather than failures.
async fn probe(
    bridge: &dyn DomBridge,
    selector: &str,
    require_visible: bool,
) -> Result<Option<ElementHandle>, crate::LocatorError> {
    let el = match bridge.query(selector).await {
        Ok(Some(el)) => el,
        Ok(None) => return Ok(None),
        Err(DomError::InvalidSelector(_)) => {
            trace!(selector, "skipping invalid selector");
            return Ok(None);
        }
        Err(err) => {
            warn!(selector, error = %err, "bridge query failed");
            return Err(err.into());
        }
    };

    if !require_visible {
        return Ok(Some(el));
    }

    match bridge.is_visible(el).await {
        Ok(true) => Ok(Some(el)),
        Ok(false) => Ok(None),
        Err(DomError::Detached(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocatorError;
    use dom_bridge::{FakeDom, NodeSpec, Rect};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn quick() -> WaitOptions {
        WaitOptions::default()
            .with_timeout_ms(400)
            .with_interval_ms(20)
    }

    #[tokio::test]
    async fn test_finds_element_that_appears_later() {
        let dom = FakeDom::new();
        dom.insert_after(
            Duration::from_millis(80),
            NodeSpec::new("button").selector("[aria-label=\"Sketch\"]"),
        );

        let el = wait_for_element(&dom, "[aria-label=\"Sketch\"]", quick())
            .await
            .unwrap();
        assert!(dom.is_visible(el).await.unwrap());
    }

    #[tokio::test]
    async fn test_later_candidate_wins_over_invisible_earlier_match() {
        let dom = FakeDom::new();
        dom.mark_invalid_selector("button:has-text(\"OK\")");
        dom.insert(NodeSpec::new("button").selector("[data-action=\"ok\"]").visible(false));
        let visible = dom.insert(NodeSpec::new("button").selector(".dialog-ok-button"));

        let el = wait_for_any(
            &dom,
            &[
                "button:has-text(\"OK\")",
                "[data-action=\"ok\"]",
                ".dialog-ok-button",
            ],
            quick(),
        )
        .await
        .unwrap();
        assert_eq!(el, visible);
    }

    #[tokio::test]
    async fn test_zero_size_box_is_not_visible() {
        let dom = FakeDom::new();
        dom.insert(
            NodeSpec::new("button")
                .selector("[data-action=\"ok\"]")
                .rect(Rect::new(0.0, 0.0, 0.0, 0.0)),
        );

        let err = wait_for_element(&dom, "[data-action=\"ok\"]", quick())
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_not_found_names_all_candidates() {
        let dom = FakeDom::new();
        let err = wait_for_any(&dom, &["#a", "#b", "#c"], quick())
            .await
            .unwrap_err();
        match err {
            LocatorError::NotFound {
                candidates,
                timeout_ms,
            } => {
                assert_eq!(candidates, vec!["#a", "#b", "#c"]);
                assert_eq!(timeout_ms, 400);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_for_gone() {
        let dom = FakeDom::new();
        let el = dom.insert(NodeSpec::new("div").selector(".feature-dialog"));
        dom.remove_after(Duration::from_millis(60), el);

        wait_for_gone(&dom, ".feature-dialog", quick()).await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_gone_times_out() {
        let dom = FakeDom::new();
        dom.insert(NodeSpec::new("div").selector(".feature-dialog"));

        let err = wait_for_gone(&dom, ".feature-dialog", quick())
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::StillPresent { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_condition() {
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();

        wait_for_condition(
            move || {
                let counter = counter.clone();
                async move { counter.fetch_add(1, Ordering::SeqCst) >= 3 }
            },
            "three polls elapsed",
            quick(),
        )
        .await
        .unwrap();
        assert!(polls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_wait_for_condition_timeout() {
        let err = wait_for_condition(|| async { false }, "never", quick())
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::ConditionTimeout { .. }));
    }
}
