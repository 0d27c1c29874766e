//! Service configuration.

use serde::{Deserialize, Serialize};

use crate::abi::{FUNC_GENERAL_QUERY_BASE, FUNC_WATCHDOG, FunctionId, OWNER_TRUSTED_OS_EXTRA};
use crate::error::ConfigError;

/// Configuration of a watchdog service instance.
///
/// The defaults match the published interface: the watchdog sits at
/// function number 0 of the extra-services range, the call count query is
/// answered, and GET_TIMELEFT results are mirrored into `a1` for callers that
/// read them from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Function number of the watchdog inside the extra-services range.
    pub watchdog_function: u16,

    /// Answer the extra-services call count query.
    pub answer_calls_count: bool,

    /// Also write the GET_TIMELEFT result into `a1`.
    pub mirror_time_left_in_a1: bool,
}

impl ServiceConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the watchdog function number falls in the range
    /// reserved for general queries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watchdog_function >= FUNC_GENERAL_QUERY_BASE {
            return Err(ConfigError::ReservedFunction(self.watchdog_function));
        }
        Ok(())
    }

    /// Function identifier the watchdog answers to.
    #[must_use]
    pub const fn watchdog_function_id(&self) -> FunctionId {
        FunctionId::fast_call32(OWNER_TRUSTED_OS_EXTRA, self.watchdog_function)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            watchdog_function: FUNC_WATCHDOG,
            answer_calls_count: true,
            mirror_time_left_in_a1: true,
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Set the watchdog function number.
    #[must_use]
    pub fn watchdog_function(mut self, function: u16) -> Self {
        self.config.watchdog_function = function;
        self
    }

    /// Enable or disable the call count query.
    #[must_use]
    pub fn answer_calls_count(mut self, enabled: bool) -> Self {
        self.config.answer_calls_count = enabled;
        self
    }

    /// Enable or disable mirroring GET_TIMELEFT into `a1`.
    #[must_use]
    pub fn mirror_time_left_in_a1(mut self, enabled: bool) -> Self {
        self.config.mirror_time_left_in_a1 = enabled;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::SMC_WATCHDOG;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.watchdog_function, 0);
        assert!(config.answer_calls_count);
        assert!(config.mirror_time_left_in_a1);
        assert_eq!(config.watchdog_function_id().raw(), SMC_WATCHDOG);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_rejects_reserved_function() {
        let result = ServiceConfig::builder().watchdog_function(0xFF01).build();
        assert_eq!(result, Err(ConfigError::ReservedFunction(0xFF01)));
    }

    #[test]
    fn test_builder() {
        let result = ServiceConfig::builder()
            .watchdog_function(3)
            .answer_calls_count(false)
            .mirror_time_left_in_a1(false)
            .build();
        assert!(result.is_ok());
        if let Ok(config) = result {
            assert_eq!(config.watchdog_function_id().raw(), 0xBC00_0003);
            assert!(!config.answer_calls_count);
            assert!(!config.mirror_time_left_in_a1);
        }
    }
}
