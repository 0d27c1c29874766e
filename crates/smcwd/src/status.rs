//! Status codes returned to the caller in `a0`.
//!
//! The service reuses the PSCI return value encoding. Codes are 32-bit signed
//! values, sign-extended when written into a 64-bit register.

/// Caller-visible outcome of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SmcStatus {
    /// Command completed as requested.
    Success = 0,
    /// Unknown function identifier, unknown command, or unsupported hardware feature.
    NotSupported = -1,
    /// Operand outside its valid domain.
    InvalidParameters = -2,
    /// The watchdog hardware or driver failed.
    InternalFailure = -6,
    /// PET or GET_TIMELEFT while the watchdog is not enabled.
    Disabled = -8,
}

impl SmcStatus {
    /// Numeric PSCI code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Register encoding of the code (sign-extended to 64 bits).
    #[must_use]
    #[expect(clippy::cast_sign_loss, reason = "two's complement register encoding")]
    pub const fn to_register(self) -> u64 {
        self.code() as i64 as u64
    }

    /// Decode a status register written by [`SmcStatus::to_register`].
    ///
    /// Only the low 32 bits are inspected, so values read back by an SMC32
    /// caller decode the same way.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "status codes occupy the low 32 bits"
    )]
    pub const fn from_register(reg: u64) -> Option<Self> {
        Self::from_code(reg as u32 as i32)
    }

    /// Decode a numeric PSCI code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            -1 => Some(Self::NotSupported),
            -2 => Some(Self::InvalidParameters),
            -6 => Some(Self::InternalFailure),
            -8 => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Whether the call succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Name of the status as used in the interface documentation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::InvalidParameters => "INVALID_PARAMETERS",
            Self::InternalFailure => "INTERNAL_FAILURE",
            Self::Disabled => "DISABLED",
        }
    }
}

impl core::fmt::Display for SmcStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SmcStatus::Success.code(), 0);
        assert_eq!(SmcStatus::NotSupported.code(), -1);
        assert_eq!(SmcStatus::InvalidParameters.code(), -2);
        assert_eq!(SmcStatus::InternalFailure.code(), -6);
        assert_eq!(SmcStatus::Disabled.code(), -8);
    }

    #[test]
    fn test_register_encoding_is_sign_extended() {
        assert_eq!(SmcStatus::Success.to_register(), 0);
        assert_eq!(SmcStatus::NotSupported.to_register(), u64::MAX);
        assert_eq!(
            SmcStatus::Disabled.to_register(),
            0xFFFF_FFFF_FFFF_FFF8
        );
    }

    #[test]
    fn test_from_register_accepts_low_word() {
        assert_eq!(
            SmcStatus::from_register(0xFFFF_FFFF),
            Some(SmcStatus::NotSupported)
        );
        assert_eq!(
            SmcStatus::from_register(SmcStatus::InternalFailure.to_register()),
            Some(SmcStatus::InternalFailure)
        );
        assert_eq!(SmcStatus::from_register(7), None);
    }
}
