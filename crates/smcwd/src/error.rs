//! Error types for the watchdog service.
//!
//! Nothing here crosses the privilege boundary as-is: every error is
//! classified into an [`SmcStatus`] before it reaches the caller.

use thiserror::Error;

use crate::status::SmcStatus;

/// Failure reported by a watchdog driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The hardware does not implement the requested operation.
    #[error("operation not supported by the watchdog hardware")]
    Unsupported,

    /// The hardware did not complete the operation within its bounded wait.
    #[error("watchdog hardware did not respond in time")]
    Timeout,

    /// Any other hardware fault.
    #[error("watchdog hardware error: {0}")]
    Hardware(&'static str),
}

/// Why an operand was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The watchdog has not been initialized, so there is nothing to validate against.
    Uninitialized,
    /// Timeout below the hardware minimum (or zero).
    TimeoutBelowMinimum,
    /// Timeout above the hardware maximum.
    TimeoutAboveMaximum,
    /// Enable flag other than 0 or 1.
    EnableFlag,
    /// Enable requested while no timeout has been configured.
    TimeoutNotConfigured,
}

impl InvalidReason {
    /// Short description used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "watchdog not initialized",
            Self::TimeoutBelowMinimum => "timeout below minimum",
            Self::TimeoutAboveMaximum => "timeout above maximum",
            Self::EnableFlag => "enable flag must be 0 or 1",
            Self::TimeoutNotConfigured => "no timeout configured",
        }
    }
}

impl core::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a watchdog command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Operand outside its valid domain.
    #[error("invalid parameters: {0}")]
    InvalidParameters(InvalidReason),

    /// The driver failed while executing the command.
    #[error("internal failure: {0}")]
    InternalFailure(#[source] DriverError),

    /// The driver reported bounds that cannot be honored.
    #[error("internal failure: driver reported bounds {min}..={max}")]
    InvalidBounds {
        /// Reported minimum.
        min: u32,
        /// Reported maximum.
        max: u32,
    },

    /// The watchdog is not enabled.
    #[error("watchdog is disabled")]
    Disabled,

    /// Unknown command or unsupported hardware feature.
    #[error("not supported")]
    NotSupported,
}

impl ServiceError {
    /// Status code reported to the caller for this error.
    #[must_use]
    pub const fn status(&self) -> SmcStatus {
        match self {
            Self::InvalidParameters(_) => SmcStatus::InvalidParameters,
            Self::InternalFailure(_) | Self::InvalidBounds { .. } => SmcStatus::InternalFailure,
            Self::Disabled => SmcStatus::Disabled,
            Self::NotSupported => SmcStatus::NotSupported,
        }
    }
}

impl From<DriverError> for ServiceError {
    fn from(err: DriverError) -> Self {
        Self::InternalFailure(err)
    }
}

/// Invalid service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The watchdog function number collides with the general query range.
    #[error("watchdog function number {0:#06x} is reserved for range queries")]
    ReservedFunction(u16),
}

/// A specialized `Result` type for driver operations.
pub type DriverResult<T> = core::result::Result<T, DriverError>;

/// A specialized `Result` type for watchdog commands.
pub type ServiceResult<T> = core::result::Result<T, ServiceError>;
