//! Watchdog command state machine.
//!
//! [`WatchdogService`] owns the [`WatchdogContext`] and the driver. Each
//! command checks, in this order, that the command is known, that the
//! lifecycle/enabled state allows it, and that its operand is in range, so an
//! unsupported command never reveals watchdog state and a disabled watchdog
//! never reveals a stale timeout.
//!
//! The context is only updated after the driver call it depends on has
//! succeeded, so a failed command leaves it exactly as it was.

use crate::command::{Command, ReplyData, WatchdogCall, WatchdogReply};
use crate::context::{WatchdogContext, WatchdogState};
use crate::driver::{TimeoutBounds, WatchdogDriver};
use crate::error::{DriverError, InvalidReason, ServiceError, ServiceResult};
use crate::stats::ServiceStats;
use crate::status::SmcStatus;

/// Watchdog service instance: one context, one driver.
///
/// Commands take `&mut self`; callers that share an instance between cores
/// must serialize access (see `SharedSmcHandler` with the `std` feature).
#[derive(Debug)]
pub struct WatchdogService<D> {
    driver: D,
    context: WatchdogContext,
    stats: ServiceStats,
}

impl<D: WatchdogDriver> WatchdogService<D> {
    /// Create an uninitialized service around `driver`.
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            context: WatchdogContext::new(),
            stats: ServiceStats::new(),
        }
    }

    /// The watchdog context.
    #[must_use]
    pub fn context(&self) -> &WatchdogContext {
        &self.context
    }

    /// Observable watchdog state.
    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.context.state()
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats
    }

    /// The driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The driver, mutably. Intended for platform bring-up and tests.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the service and return its driver.
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// INIT: query the hardware bounds and leave the watchdog disabled.
    ///
    /// Re-initialization is allowed. A timeout configured before keeps
    /// applying if it still fits the new bounds and is programmed again.
    ///
    /// If the driver itself fails the context is left as it was. Once the
    /// driver has been reset but reports unusable bounds, the context goes
    /// back to uninitialized, since the countdown is no longer running.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InternalFailure`] if the driver fails.
    /// - [`ServiceError::InvalidBounds`] if the driver reports an empty range
    ///   or a zero minimum.
    pub fn init(&mut self) -> ServiceResult<TimeoutBounds> {
        let bounds = self.driver.init()?;
        if !bounds.is_valid() {
            self.context.reset();
            return Err(ServiceError::InvalidBounds {
                min: bounds.min,
                max: bounds.max,
            });
        }

        self.context.initialize(bounds);
        if let Some(timeout) = self.context.timeout_seconds() {
            if let Err(err) = self.driver.program(timeout) {
                self.context.clear_timeout();
                return Err(err.into());
            }
        }
        Ok(bounds)
    }

    /// SET_TIMEOUT: program a new countdown period in seconds.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidParameters`] if the watchdog is not
    ///   initialized or `seconds` is outside the bounds (zero included).
    /// - [`ServiceError::InternalFailure`] if the driver fails.
    pub fn set_timeout(&mut self, seconds: u32) -> ServiceResult<()> {
        let bounds = self
            .context
            .bounds()
            .ok_or(ServiceError::InvalidParameters(InvalidReason::Uninitialized))?;

        if seconds < bounds.min {
            return Err(ServiceError::InvalidParameters(
                InvalidReason::TimeoutBelowMinimum,
            ));
        }
        if seconds > bounds.max {
            return Err(ServiceError::InvalidParameters(
                InvalidReason::TimeoutAboveMaximum,
            ));
        }

        self.driver.program(seconds)?;
        self.context.set_timeout(seconds);
        Ok(())
    }

    /// ENABLE: start (`1`) or stop (`0`) the countdown.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidParameters`] if the watchdog is not
    ///   initialized, `flag` is not 0 or 1, or no timeout is configured when
    ///   starting.
    /// - [`ServiceError::InternalFailure`] if the driver fails.
    pub fn enable(&mut self, flag: u32) -> ServiceResult<()> {
        if self.context.bounds().is_none() {
            return Err(ServiceError::InvalidParameters(InvalidReason::Uninitialized));
        }

        let enable = match flag {
            0 => false,
            1 => true,
            _ => return Err(ServiceError::InvalidParameters(InvalidReason::EnableFlag)),
        };

        if enable && self.context.timeout_seconds().is_none() {
            return Err(ServiceError::InvalidParameters(
                InvalidReason::TimeoutNotConfigured,
            ));
        }

        self.driver.arm(enable)?;
        self.context.set_enabled(enable);
        Ok(())
    }

    /// PET: restart the countdown.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Disabled`] if the watchdog is not enabled.
    /// - [`ServiceError::InternalFailure`] if the driver fails.
    pub fn pet(&mut self) -> ServiceResult<()> {
        if !self.context.is_enabled() {
            return Err(ServiceError::Disabled);
        }
        self.driver.refresh()?;
        self.stats.record_pet();
        Ok(())
    }

    /// GET_TIMELEFT: seconds before the watchdog fires.
    ///
    /// The reported value never exceeds the configured timeout.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Disabled`] if the watchdog is not enabled.
    /// - [`ServiceError::NotSupported`] if the hardware cannot report it.
    /// - [`ServiceError::InternalFailure`] if the driver fails.
    pub fn time_left(&mut self) -> ServiceResult<u32> {
        if !self.context.is_enabled() {
            return Err(ServiceError::Disabled);
        }
        let remaining = match self.driver.remaining() {
            Ok(seconds) => seconds,
            Err(DriverError::Unsupported) => return Err(ServiceError::NotSupported),
            Err(err) => return Err(err.into()),
        };
        Ok(self
            .context
            .timeout_seconds()
            .map_or(remaining, |timeout| remaining.min(timeout)))
    }

    /// Execute a decoded command.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotSupported`] for [`Command::Unknown`], otherwise the
    /// errors of the individual command.
    pub fn execute(&mut self, command: Command) -> ServiceResult<ReplyData> {
        match command {
            Command::Unknown(_) => Err(ServiceError::NotSupported),
            Command::Init => self
                .init()
                .map(|bounds| ReplyData::Bounds {
                    min: bounds.min,
                    max: bounds.max,
                }),
            Command::SetTimeout(seconds) => self.set_timeout(seconds).map(|()| ReplyData::None),
            Command::Enable(flag) => self.enable(flag).map(|()| ReplyData::None),
            Command::Pet => self.pet().map(|()| ReplyData::None),
            Command::GetTimeLeft => self.time_left().map(ReplyData::TimeLeft),
        }
    }

    /// Execute a decoded call and classify its outcome for the caller.
    pub fn execute_call(&mut self, call: WatchdogCall) -> WatchdogReply {
        let command = call.command;
        tracing::trace!(
            command = command.name(),
            code = command.code(),
            state = %self.context.state(),
            "watchdog command"
        );

        let reply = match self.execute(command) {
            Ok(data) => WatchdogReply {
                status: SmcStatus::Success,
                data,
                client_id: call.client_id,
            },
            Err(err) => {
                match err {
                    ServiceError::InternalFailure(_) | ServiceError::InvalidBounds { .. } => {
                        tracing::warn!(command = command.name(), error = %err, "watchdog driver failure");
                    }
                    _ => {
                        tracing::debug!(command = command.name(), error = %err, "watchdog command refused");
                    }
                }
                WatchdogReply::status_only(err.status(), call.client_id)
            }
        };

        self.stats.record_outcome(reply.status);
        reply
    }

    /// Count a call refused before reaching the state machine.
    pub(crate) fn record_rejected(&mut self) {
        self.stats.record_rejected();
    }
}
