//! Simulated watchdog driver.
//!
//! [`SimulatedWatchdog`] implements [`WatchdogDriver`] without any hardware.
//! Time is a manual seconds counter advanced with
//! [`SimulatedWatchdog::advance`], which makes expiry fully deterministic in
//! tests. Faults can be injected per operation and every driver call is
//! logged, so tests can assert that a command did or did not reach the
//! hardware.

use alloc::vec::Vec;

use crate::driver::{TimeoutBounds, WatchdogDriver, poll_bounded};
use crate::error::{DriverError, DriverResult};

/// A driver call as seen by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOp {
    /// `init()`
    Init,
    /// `program(seconds)`
    Program(u32),
    /// `arm(enable)`
    Arm(bool),
    /// `refresh()`
    Refresh,
    /// `remaining()`
    Remaining,
}

/// Driver operation a fault can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// `init()`
    Init,
    /// `program()`
    Program,
    /// `arm()`
    Arm,
    /// `refresh()`
    Refresh,
    /// `remaining()`
    Remaining,
}

#[derive(Debug, Clone, Copy, Default)]
struct FaultPlan {
    init: Option<DriverError>,
    program: Option<DriverError>,
    arm: Option<DriverError>,
    refresh: Option<DriverError>,
    remaining: Option<DriverError>,
}

impl FaultPlan {
    fn slot(&mut self, kind: FaultKind) -> &mut Option<DriverError> {
        match kind {
            FaultKind::Init => &mut self.init,
            FaultKind::Program => &mut self.program,
            FaultKind::Arm => &mut self.arm,
            FaultKind::Refresh => &mut self.refresh,
            FaultKind::Remaining => &mut self.remaining,
        }
    }

    fn check(&mut self, kind: FaultKind) -> DriverResult<()> {
        match *self.slot(kind) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Register write synchronization model.
///
/// Some timer peripherals accept a write only after it has crossed into a
/// slow clock domain; software polls a busy bit meanwhile. `polls_needed`
/// is how long the busy bit stays set, `poll_budget` how long the driver is
/// willing to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SyncModel {
    polls_needed: u32,
    poll_budget: u32,
}

/// Hardware-free watchdog.
#[derive(Debug, Clone)]
pub struct SimulatedWatchdog {
    bounds: TimeoutBounds,
    reports_time_left: bool,
    sync: SyncModel,
    initialized: bool,
    timeout: Option<u32>,
    armed: bool,
    now: u64,
    deadline: u64,
    expirations: u32,
    faults: FaultPlan,
    log: Vec<DriverOp>,
}

impl SimulatedWatchdog {
    /// Simulated hardware supporting timeouts in `bounds`.
    #[must_use]
    pub fn new(bounds: TimeoutBounds) -> Self {
        Self {
            bounds,
            reports_time_left: true,
            sync: SyncModel {
                polls_needed: 0,
                poll_budget: 16,
            },
            initialized: false,
            timeout: None,
            armed: false,
            now: 0,
            deadline: 0,
            expirations: 0,
            faults: FaultPlan::default(),
            log: Vec::new(),
        }
    }

    /// Simulated hardware supporting timeouts from `min` to `max` seconds.
    #[must_use]
    pub fn with_bounds(min: u32, max: u32) -> Self {
        Self::new(TimeoutBounds::new(min, max))
    }

    /// Hardware that cannot report the time left.
    #[must_use]
    pub fn without_time_left(mut self) -> Self {
        self.reports_time_left = false;
        self
    }

    /// Writes stay busy for `polls_needed` polls; the driver gives up after `poll_budget`.
    #[must_use]
    pub fn with_sync_delay(mut self, polls_needed: u32, poll_budget: u32) -> Self {
        self.sync = SyncModel {
            polls_needed,
            poll_budget,
        };
        self
    }

    /// Make every future call of `kind` fail with `err`.
    pub fn inject_fault(&mut self, kind: FaultKind, err: DriverError) {
        *self.faults.slot(kind) = Some(err);
    }

    /// Remove the fault attached to `kind`.
    pub fn clear_fault(&mut self, kind: FaultKind) {
        *self.faults.slot(kind) = None;
    }

    /// Remove all injected faults.
    pub fn clear_faults(&mut self) {
        self.faults = FaultPlan::default();
    }

    /// Advance the simulated clock.
    ///
    /// If the countdown is running and reaches zero the watchdog fires: the
    /// expiry is counted and the countdown stops, as it would after a reset.
    pub fn advance(&mut self, seconds: u64) {
        self.now = self.now.saturating_add(seconds);
        if self.armed && self.now >= self.deadline {
            self.expirations = self.expirations.saturating_add(1);
            self.armed = false;
        }
    }

    /// Number of times the watchdog fired.
    #[must_use]
    pub fn expirations(&self) -> u32 {
        self.expirations
    }

    /// Whether the countdown is running.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Timeout currently programmed into the simulated hardware.
    #[must_use]
    pub fn programmed_timeout(&self) -> Option<u32> {
        self.timeout
    }

    /// Driver calls received so far.
    #[must_use]
    pub fn interactions(&self) -> &[DriverOp] {
        &self.log
    }

    /// Forget the recorded driver calls.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn seconds_left(&self) -> u32 {
        let left = self.deadline.saturating_sub(self.now);
        u32::try_from(left).unwrap_or(u32::MAX)
    }

    fn restart_countdown(&mut self, timeout: u32) {
        self.deadline = self.now.saturating_add(u64::from(timeout));
    }

    fn wait_sync(&self) -> DriverResult<()> {
        let mut polls = 0u32;
        let needed = self.sync.polls_needed;
        poll_bounded(self.sync.poll_budget, || {
            polls = polls.saturating_add(1);
            polls > needed
        })
    }
}

impl Default for SimulatedWatchdog {
    fn default() -> Self {
        Self::with_bounds(1, 3600)
    }
}

impl WatchdogDriver for SimulatedWatchdog {
    fn init(&mut self) -> DriverResult<TimeoutBounds> {
        self.log.push(DriverOp::Init);
        self.faults.check(FaultKind::Init)?;
        self.initialized = true;
        self.armed = false;
        self.timeout = None;
        Ok(self.bounds)
    }

    fn program(&mut self, timeout_seconds: u32) -> DriverResult<()> {
        self.log.push(DriverOp::Program(timeout_seconds));
        self.faults.check(FaultKind::Program)?;
        if !self.initialized {
            return Err(DriverError::Hardware("timer not initialized"));
        }
        if !self.bounds.contains(timeout_seconds) {
            return Err(DriverError::Hardware("timeout out of range"));
        }
        self.wait_sync()?;
        self.timeout = Some(timeout_seconds);
        if self.armed {
            self.restart_countdown(timeout_seconds);
        }
        Ok(())
    }

    fn arm(&mut self, enable: bool) -> DriverResult<()> {
        self.log.push(DriverOp::Arm(enable));
        self.faults.check(FaultKind::Arm)?;
        if !enable {
            self.wait_sync()?;
            self.armed = false;
            return Ok(());
        }
        let Some(timeout) = self.timeout else {
            return Err(DriverError::Hardware("no timeout programmed"));
        };
        self.wait_sync()?;
        self.restart_countdown(timeout);
        self.armed = true;
        Ok(())
    }

    fn refresh(&mut self) -> DriverResult<()> {
        self.log.push(DriverOp::Refresh);
        self.faults.check(FaultKind::Refresh)?;
        if let (true, Some(timeout)) = (self.armed, self.timeout) {
            self.restart_countdown(timeout);
        }
        Ok(())
    }

    fn remaining(&mut self) -> DriverResult<u32> {
        self.log.push(DriverOp::Remaining);
        self.faults.check(FaultKind::Remaining)?;
        if !self.reports_time_left {
            return Err(DriverError::Unsupported);
        }
        if self.armed {
            Ok(self.seconds_left())
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_and_expiry() {
        let mut wdt = SimulatedWatchdog::with_bounds(1, 60);
        assert_eq!(wdt.init(), Ok(TimeoutBounds::new(1, 60)));
        assert_eq!(wdt.program(10), Ok(()));
        assert_eq!(wdt.arm(true), Ok(()));

        wdt.advance(4);
        assert_eq!(wdt.remaining(), Ok(6));
        assert_eq!(wdt.refresh(), Ok(()));
        assert_eq!(wdt.remaining(), Ok(10));

        wdt.advance(10);
        assert_eq!(wdt.expirations(), 1);
        assert!(!wdt.is_armed());
    }

    #[test]
    fn test_arm_without_timeout_fails() {
        let mut wdt = SimulatedWatchdog::default();
        assert!(wdt.init().is_ok());
        assert_eq!(
            wdt.arm(true),
            Err(DriverError::Hardware("no timeout programmed"))
        );
    }

    #[test]
    fn test_program_before_init_fails() {
        let mut wdt = SimulatedWatchdog::default();
        assert!(wdt.program(5).is_err());
    }

    #[test]
    fn test_fault_injection() {
        let mut wdt = SimulatedWatchdog::default();
        wdt.inject_fault(FaultKind::Init, DriverError::Hardware("clock gate"));
        assert_eq!(wdt.init(), Err(DriverError::Hardware("clock gate")));
        wdt.clear_fault(FaultKind::Init);
        assert!(wdt.init().is_ok());
        assert_eq!(wdt.interactions(), &[DriverOp::Init, DriverOp::Init]);
    }

    #[test]
    fn test_sync_timeout() {
        let mut wdt = SimulatedWatchdog::default().with_sync_delay(20, 8);
        assert!(wdt.init().is_ok());
        assert_eq!(wdt.program(5), Err(DriverError::Timeout));
        assert_eq!(wdt.programmed_timeout(), None);

        let mut slow_but_ok = SimulatedWatchdog::default().with_sync_delay(3, 8);
        assert!(slow_but_ok.init().is_ok());
        assert_eq!(slow_but_ok.program(5), Ok(()));
    }

    #[test]
    fn test_time_left_unsupported() {
        let mut wdt = SimulatedWatchdog::default().without_time_left();
        assert_eq!(wdt.remaining(), Err(DriverError::Unsupported));
    }
}
