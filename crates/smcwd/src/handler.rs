//! SMC entry point of the extra-services range.
//!
//! [`WatchdogSmcHandler`] chains the authorization gate, register
//! marshaling and the watchdog state machine:
//!
//! ```text
//! trap ─► gate ─► decode ─► WatchdogService ─► encode ─► return
//!           │
//!           └─ rejected ─► a0 = NOT_SUPPORTED
//! ```

use crate::command::WatchdogCall;
use crate::config::ServiceConfig;
use crate::context::WatchdogState;
use crate::driver::WatchdogDriver;
use crate::error::ConfigError;
use crate::gate::{AuthorizationGate, ExtraFunction, GateDecision, RejectReason};
use crate::regs::SmcArgs;
use crate::service::WatchdogService;
use crate::stats::ServiceStats;
use crate::status::SmcStatus;

/// Number of services exposed in the extra range, reported by the call count query.
pub const EXTRA_CALLS_COUNT: u32 = 1;

/// What the handler did with a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The call was served; the registers hold its result.
    Handled(ExtraFunction),
    /// The call was refused; `a0` holds NOT_SUPPORTED.
    Rejected(RejectReason),
}

/// SMC handler owning one watchdog service instance.
#[derive(Debug)]
pub struct WatchdogSmcHandler<D> {
    config: ServiceConfig,
    gate: AuthorizationGate,
    service: WatchdogService<D>,
}

impl<D: WatchdogDriver> WatchdogSmcHandler<D> {
    /// Handler with the default configuration.
    #[must_use]
    pub fn new(driver: D) -> Self {
        let config = ServiceConfig::default();
        Self {
            gate: AuthorizationGate::new(&config),
            config,
            service: WatchdogService::new(driver),
        }
    }

    /// Handler with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(driver: D, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gate: AuthorizationGate::new(&config),
            config,
            service: WatchdogService::new(driver),
        })
    }

    /// Serve one SMC.
    ///
    /// Always writes a status to `a0`. Rejected calls never reach the
    /// watchdog service and leave every other register untouched.
    pub fn handle(&mut self, args: &mut SmcArgs) -> Disposition {
        match self.gate.check(args) {
            GateDecision::Rejected(reason) => {
                tracing::debug!(
                    function_id = args.a0,
                    reason = reason.as_str(),
                    "SMC rejected"
                );
                self.service.record_rejected();
                args.a0 = SmcStatus::NotSupported.to_register();
                Disposition::Rejected(reason)
            }
            GateDecision::Accepted(ExtraFunction::Watchdog) => {
                let call = WatchdogCall::decode(args);
                let reply = self.service.execute_call(call);
                reply.encode(args, self.config.mirror_time_left_in_a1);
                Disposition::Handled(ExtraFunction::Watchdog)
            }
            GateDecision::Accepted(ExtraFunction::CallsCount) => {
                args.a0 = u64::from(EXTRA_CALLS_COUNT);
                Disposition::Handled(ExtraFunction::CallsCount)
            }
        }
    }

    /// Serve one SMC given as a register array, `a0` first.
    pub fn call(&mut self, regs: [u64; 8]) -> [u64; 8] {
        let mut args = SmcArgs::from_array(regs);
        let _disposition = self.handle(&mut args);
        args.to_array()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The watchdog service.
    #[must_use]
    pub fn service(&self) -> &WatchdogService<D> {
        &self.service
    }

    /// The watchdog service, mutably.
    pub fn service_mut(&mut self) -> &mut WatchdogService<D> {
        &mut self.service
    }

    /// Observable watchdog state.
    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.service.state()
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.service.stats()
    }
}
