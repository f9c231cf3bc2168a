//! Tuning knobs for the primitives.

/// Options for [`crate::click_element`].
#[derive(Debug, Clone, Copy)]
pub struct ClickOptions {
    /// Show the transient outline highlight before clicking.
    pub highlight: bool,
    /// How long the highlight is held, in milliseconds.
    pub highlight_duration_ms: u64,
    /// Settle delay after the click, in milliseconds.
    pub settle_delay_ms: u64,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            highlight_duration_ms: 300,
            settle_delay_ms: 100,
        }
    }
}

impl ClickOptions {
    /// Bare click with no visual feedback and no settle, for focus moves.
    pub fn silent() -> Self {
        Self {
            highlight: false,
            highlight_duration_ms: 0,
            settle_delay_ms: 0,
        }
    }
}

/// Options for [`crate::fill_input`].
#[derive(Debug, Clone, Copy)]
pub struct FillOptions {
    /// Clear the existing value (and announce the clear) before setting.
    pub clear_first: bool,
    /// Delay before blurring, in milliseconds.
    pub delay_ms: u64,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            clear_first: true,
            delay_ms: 50,
        }
    }
}
