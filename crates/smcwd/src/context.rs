//! Watchdog context owned by the service.

use crate::driver::TimeoutBounds;

/// Lifecycle of the watchdog context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// INIT has never succeeded.
    #[default]
    Uninitialized,
    /// INIT succeeded; the bounds are known.
    Initialized(TimeoutBounds),
}

/// Externally observable state of the watchdog.
///
/// ```text
///                  INIT                 ENABLE(1)
/// Uninitialized ────────► Disabled ─────────────► Enabled
///                            ▲   ◄───────────────   │
///                            │      ENABLE(0)       │
///                            └──────── INIT ────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogState {
    /// INIT has never succeeded.
    Uninitialized,
    /// Initialized, countdown stopped.
    Disabled,
    /// Initialized, countdown running.
    Enabled,
}

impl WatchdogState {
    /// State name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Disabled => "Initialized&Disabled",
            Self::Enabled => "Initialized&Enabled",
        }
    }
}

impl core::fmt::Display for WatchdogState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The watchdog context.
///
/// Only the service mutates it. The fields are private so the invariants
/// below hold for every value that can be observed from outside:
///
/// - `timeout_seconds`, when set, lies within the initialized bounds;
/// - `enabled` implies an initialized lifecycle and a configured timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchdogContext {
    lifecycle: Lifecycle,
    timeout_seconds: Option<u32>,
    enabled: bool,
}

impl WatchdogContext {
    /// A fresh, uninitialized context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            timeout_seconds: None,
            enabled: false,
        }
    }

    /// Current lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Bounds reported by the last successful INIT.
    #[must_use]
    pub const fn bounds(&self) -> Option<TimeoutBounds> {
        match self.lifecycle {
            Lifecycle::Initialized(bounds) => Some(bounds),
            Lifecycle::Uninitialized => None,
        }
    }

    /// Configured timeout in seconds.
    #[must_use]
    pub const fn timeout_seconds(&self) -> Option<u32> {
        self.timeout_seconds
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Observable state.
    #[must_use]
    pub const fn state(&self) -> WatchdogState {
        match (self.lifecycle, self.enabled) {
            (Lifecycle::Uninitialized, _) => WatchdogState::Uninitialized,
            (Lifecycle::Initialized(_), false) => WatchdogState::Disabled,
            (Lifecycle::Initialized(_), true) => WatchdogState::Enabled,
        }
    }

    /// Record a successful INIT.
    ///
    /// The countdown is marked stopped and a previously configured timeout is
    /// kept only if the new bounds still admit it.
    pub(crate) fn initialize(&mut self, bounds: TimeoutBounds) {
        self.lifecycle = Lifecycle::Initialized(bounds);
        self.enabled = false;
        self.timeout_seconds = self.timeout_seconds.filter(|&t| bounds.contains(t));
    }

    /// Forget everything, as if INIT had never succeeded.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record a programmed timeout. The caller has checked it against the bounds.
    pub(crate) fn set_timeout(&mut self, seconds: u32) {
        self.timeout_seconds = Some(seconds);
    }

    /// Forget the configured timeout.
    pub(crate) fn clear_timeout(&mut self) {
        self.timeout_seconds = None;
    }

    /// Record the countdown state. The caller has checked the invariants.
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
