//! Handler shared between cores.
//!
//! Any core may trap into the service, so the context is shared mutable
//! state. [`SharedSmcHandler`] serializes every call behind one lock: calls
//! are linearized and none of them observes a partially updated context.

use parking_lot::Mutex;

use crate::config::ServiceConfig;
use crate::context::WatchdogState;
use crate::driver::WatchdogDriver;
use crate::error::ConfigError;
use crate::handler::{Disposition, WatchdogSmcHandler};
use crate::regs::SmcArgs;
use crate::stats::ServiceStats;

/// Thread-safe wrapper around [`WatchdogSmcHandler`].
#[derive(Debug)]
pub struct SharedSmcHandler<D> {
    inner: Mutex<WatchdogSmcHandler<D>>,
}

impl<D: WatchdogDriver> SharedSmcHandler<D> {
    /// Shared handler with the default configuration.
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::from_handler(WatchdogSmcHandler::new(driver))
    }

    /// Shared handler with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(driver: D, config: ServiceConfig) -> Result<Self, ConfigError> {
        WatchdogSmcHandler::with_config(driver, config).map(Self::from_handler)
    }

    /// Wrap an existing handler.
    #[must_use]
    pub fn from_handler(handler: WatchdogSmcHandler<D>) -> Self {
        Self {
            inner: Mutex::new(handler),
        }
    }

    /// Serve one SMC under the service lock.
    pub fn handle(&self, args: &mut SmcArgs) -> Disposition {
        self.inner.lock().handle(args)
    }

    /// Serve one SMC given as a register array, `a0` first.
    pub fn call(&self, regs: [u64; 8]) -> [u64; 8] {
        self.inner.lock().call(regs)
    }

    /// Observable watchdog state.
    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.inner.lock().state()
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.inner.lock().stats()
    }

    /// Run `f` on the handler while holding the lock.
    pub fn with_handler<R>(&self, f: impl FnOnce(&mut WatchdogSmcHandler<D>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwrap the handler.
    #[must_use]
    pub fn into_inner(self) -> WatchdogSmcHandler<D> {
        self.inner.into_inner()
    }
}
