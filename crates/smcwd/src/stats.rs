//! Service counters for diagnostics.

use crate::status::SmcStatus;

/// Snapshot of service counters.
///
/// Counters saturate instead of wrapping. They are diagnostics only and
/// never influence a command's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceStats {
    /// Calls refused by the authorization gate.
    pub rejected_calls: u64,
    /// Watchdog commands that completed with SUCCESS.
    pub succeeded: u64,
    /// Watchdog commands refused with INVALID_PARAMETERS.
    pub invalid_parameters: u64,
    /// Watchdog commands that hit a driver failure.
    pub internal_failures: u64,
    /// PET / GET_TIMELEFT while disabled.
    pub disabled: u64,
    /// Unknown commands and unsupported features.
    pub not_supported: u64,
    /// Successful PET commands.
    pub pets: u64,
}

impl ServiceStats {
    /// Create zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rejected_calls: 0,
            succeeded: 0,
            invalid_parameters: 0,
            internal_failures: 0,
            disabled: 0,
            not_supported: 0,
            pets: 0,
        }
    }

    /// Record a call refused by the gate.
    pub fn record_rejected(&mut self) {
        self.rejected_calls = self.rejected_calls.saturating_add(1);
    }

    /// Record the outcome of a watchdog command.
    pub fn record_outcome(&mut self, status: SmcStatus) {
        let counter = match status {
            SmcStatus::Success => &mut self.succeeded,
            SmcStatus::InvalidParameters => &mut self.invalid_parameters,
            SmcStatus::InternalFailure => &mut self.internal_failures,
            SmcStatus::Disabled => &mut self.disabled,
            SmcStatus::NotSupported => &mut self.not_supported,
        };
        *counter = counter.saturating_add(1);
    }

    /// Record a successful PET.
    pub fn record_pet(&mut self) {
        self.pets = self.pets.saturating_add(1);
    }

    /// Total number of watchdog commands executed.
    #[must_use]
    pub fn commands(&self) -> u64 {
        self.succeeded
            .saturating_add(self.invalid_parameters)
            .saturating_add(self.internal_failures)
            .saturating_add(self.disabled)
            .saturating_add(self.not_supported)
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = ServiceStats::new();
        stats.record_outcome(SmcStatus::Success);
        stats.record_outcome(SmcStatus::Success);
        stats.record_outcome(SmcStatus::Disabled);
        stats.record_outcome(SmcStatus::NotSupported);
        stats.record_rejected();

        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.disabled, 1);
        assert_eq!(stats.not_supported, 1);
        assert_eq!(stats.rejected_calls, 1);
        assert_eq!(stats.commands(), 4);
    }

    #[test]
    fn test_saturation() {
        let mut stats = ServiceStats {
            pets: u64::MAX,
            ..ServiceStats::new()
        };
        stats.record_pet();
        assert_eq!(stats.pets, u64::MAX);
    }

    #[test]
    fn test_reset() {
        let mut stats = ServiceStats::new();
        stats.record_pet();
        stats.record_rejected();
        stats.reset();
        assert_eq!(stats, ServiceStats::default());
    }
}
