//! Watchdog driver interface.
//!
//! The service never programs timer registers itself. Platforms provide a
//! [`WatchdogDriver`] for their peripheral; tests use
//! [`SimulatedWatchdog`](crate::sim::SimulatedWatchdog).

use crate::error::{DriverError, DriverResult};

/// Timeout bounds supported by the hardware, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutBounds {
    /// Smallest programmable timeout.
    pub min: u32,
    /// Largest programmable timeout.
    pub max: u32,
}

impl TimeoutBounds {
    /// Create bounds.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether the bounds describe a usable, non-empty range of positive values.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min > 0 && self.min <= self.max
    }

    /// Whether `seconds` can be programmed.
    #[must_use]
    pub const fn contains(&self, seconds: u32) -> bool {
        self.min <= seconds && seconds <= self.max
    }
}

/// Hardware watchdog capability used by the service.
///
/// Every method must complete in bounded time. A driver that waits on the
/// hardware (for instance for a register write to synchronize into a slow
/// clock domain) must give up after a bounded number of polls and return
/// [`DriverError::Timeout`] instead of spinning forever, since a stuck
/// secure-world call stalls the normal-world caller.
///
/// # Implementation Requirements
///
/// 1. `init()` leaves the countdown stopped and reports the supported bounds.
/// 2. `program()` is only called with a value inside the reported bounds.
/// 3. `arm(true)` starts the countdown from the programmed timeout.
/// 4. `refresh()` restarts the countdown from the programmed timeout.
/// 5. `remaining()` returns [`DriverError::Unsupported`] if the hardware
///    cannot report the time left.
pub trait WatchdogDriver: Send {
    /// Initialize the peripheral and report its timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral cannot be brought up.
    fn init(&mut self) -> DriverResult<TimeoutBounds>;

    /// Program the countdown period.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware rejects or fails the write.
    fn program(&mut self, timeout_seconds: u32) -> DriverResult<()>;

    /// Start (`true`) or stop (`false`) the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware fails the operation.
    fn arm(&mut self, enable: bool) -> DriverResult<()>;

    /// Restart the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware fails the operation.
    fn refresh(&mut self) -> DriverResult<()>;

    /// Seconds remaining before the watchdog fires.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Unsupported`] when the hardware cannot report
    /// the remaining time, or another error on hardware failure.
    fn remaining(&mut self) -> DriverResult<u32>;
}

impl<D: WatchdogDriver + ?Sized> WatchdogDriver for alloc::boxed::Box<D> {
    fn init(&mut self) -> DriverResult<TimeoutBounds> {
        (**self).init()
    }

    fn program(&mut self, timeout_seconds: u32) -> DriverResult<()> {
        (**self).program(timeout_seconds)
    }

    fn arm(&mut self, enable: bool) -> DriverResult<()> {
        (**self).arm(enable)
    }

    fn refresh(&mut self) -> DriverResult<()> {
        (**self).refresh()
    }

    fn remaining(&mut self) -> DriverResult<u32> {
        (**self).remaining()
    }
}

/// Poll `ready` up to `max_polls` times.
///
/// Helper for drivers that must wait for a hardware status bit. Returns
/// [`DriverError::Timeout`] once the budget is exhausted.
///
/// # Errors
///
/// Returns [`DriverError::Timeout`] if `ready` never returned `true`.
pub fn poll_bounded(max_polls: u32, mut ready: impl FnMut() -> bool) -> DriverResult<()> {
    for _ in 0..max_polls {
        if ready() {
            return Ok(());
        }
        core::hint::spin_loop();
    }
    Err(DriverError::Timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_validity() {
        assert!(TimeoutBounds::new(1, 3600).is_valid());
        assert!(TimeoutBounds::new(5, 5).is_valid());
        assert!(!TimeoutBounds::new(0, 10).is_valid());
        assert!(!TimeoutBounds::new(10, 5).is_valid());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = TimeoutBounds::new(2, 30);
        assert!(bounds.contains(2));
        assert!(bounds.contains(30));
        assert!(!bounds.contains(1));
        assert!(!bounds.contains(31));
    }

    #[test]
    fn test_poll_bounded() {
        let mut polls = 0u32;
        let result = poll_bounded(10, || {
            polls += 1;
            polls == 3
        });
        assert_eq!(result, Ok(()));
        assert_eq!(polls, 3);

        assert_eq!(poll_bounded(4, || false), Err(DriverError::Timeout));
        assert_eq!(poll_bounded(0, || true), Err(DriverError::Timeout));
    }

    #[test]
    fn test_trait_object_safety() {
        fn assert_send<T: Send + ?Sized>() {}
        assert_send::<dyn WatchdogDriver>();
    }
}
