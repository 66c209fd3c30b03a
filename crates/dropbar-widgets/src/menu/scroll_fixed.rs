#![forbid(unsafe_code)]

//! Scroll-fixed detection: is the bar "stuck" to the top of the host?
//!
//! Two states, [`FixedMode::Free`] and [`FixedMode::Fixed`]. Every scroll
//! signal is classified on its own (no hysteresis): the bar is fixed iff the
//! host offset is strictly greater than the threshold.

use dropbar_core::scroll::ScrollSignal;

/// The `scroll_fixed` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollFixed {
    /// Detector disabled.
    #[default]
    Off,
    /// Enabled with [`ScrollFixed::DEFAULT_THRESHOLD`].
    On,
    /// Enabled with a custom threshold in rows.
    Threshold(u32),
}

impl ScrollFixed {
    /// Threshold used by [`ScrollFixed::On`].
    pub const DEFAULT_THRESHOLD: u32 = 30;

    /// The active threshold, or `None` when disabled.
    #[must_use]
    pub const fn threshold(self) -> Option<u32> {
        match self {
            Self::Off => None,
            Self::On => Some(Self::DEFAULT_THRESHOLD),
            Self::Threshold(n) => Some(n),
        }
    }

    /// Whether the detector should listen at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Numeric form: zero disables the detector, like `false`.
    #[must_use]
    pub const fn from_threshold(threshold: u32) -> Self {
        if threshold == 0 {
            Self::Off
        } else {
            Self::Threshold(threshold)
        }
    }
}

impl From<bool> for ScrollFixed {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

impl From<u32> for ScrollFixed {
    fn from(threshold: u32) -> Self {
        Self::from_threshold(threshold)
    }
}

/// Visual mode derived from the host scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FixedMode {
    /// Bar scrolls with the page.
    #[default]
    Free,
    /// Bar is stuck to the top.
    Fixed,
}

impl FixedMode {
    /// Whether this is [`FixedMode::Fixed`].
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed)
    }
}

/// Classify one offset against a threshold (strictly greater is fixed).
#[must_use]
pub const fn classify(offset: u32, threshold: u32) -> FixedMode {
    if offset > threshold {
        FixedMode::Fixed
    } else {
        FixedMode::Free
    }
}

/// Two-state machine fed by scroll signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollFixedDetector {
    mode: FixedMode,
}

impl ScrollFixedDetector {
    /// Start in [`FixedMode::Free`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: FixedMode::Free,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> FixedMode {
        self.mode
    }

    /// Classify `signal`; returns the new mode only if it changed.
    pub(crate) fn observe(&mut self, threshold: u32, signal: ScrollSignal) -> Option<FixedMode> {
        let next = classify(signal.offset(), threshold);
        if next == self.mode {
            return None;
        }
        self.mode = next;
        Some(next)
    }

    /// Return to [`FixedMode::Free`].
    pub(crate) fn reset(&mut self) {
        self.mode = FixedMode::Free;
    }
}
