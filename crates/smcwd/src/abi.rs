//! SMC function identifier layout and the constants of the extra-services range.
//!
//! A function identifier is a 32-bit word laid out as follows:
//!
//! ```text
//!  31  30  29      24 23      16 15                0
//! ┌───┬───┬──────────┬──────────┬───────────────────┐
//! │ F │ W │  owner   │ reserved │  function number  │
//! └───┴───┴──────────┴──────────┴───────────────────┘
//!  F: 1 = fast call, 0 = yielding (standard) call
//!  W: 1 = SMC64 convention, 0 = SMC32 convention
//! ```
//!
//! The watchdog service lives in the "trusted OS extra services" owner range
//! as a 32-bit fast call with function number 0.

/// Owner value of the trusted OS extra services range.
pub const OWNER_TRUSTED_OS_EXTRA: u8 = 60;

/// Function number of the watchdog service inside the extra range.
pub const FUNC_WATCHDOG: u16 = 0;

/// First function number reserved for general range queries.
///
/// Function numbers from here to `0xFFFF` describe the range itself and are
/// never assigned to a service.
pub const FUNC_GENERAL_QUERY_BASE: u16 = 0xFF00;

/// Function number of the extra-services call count query, the first of the
/// general range queries.
pub const FUNC_EXTRA_CALLS_COUNT: u16 = FUNC_GENERAL_QUERY_BASE;

/// Full function identifier of the watchdog service.
pub const SMC_WATCHDOG: u32 = FunctionId::fast_call32(OWNER_TRUSTED_OS_EXTRA, FUNC_WATCHDOG).raw();

/// Full function identifier of the extra-services call count query.
pub const SMC_EXTRA_CALLS_COUNT: u32 =
    FunctionId::fast_call32(OWNER_TRUSTED_OS_EXTRA, FUNC_EXTRA_CALLS_COUNT).raw();

const FAST_CALL_BIT: u32 = 1 << 31;
const SMC64_BIT: u32 = 1 << 30;
const OWNER_SHIFT: u32 = 24;
const OWNER_MASK: u32 = 0x3F;
const RESERVED_SHIFT: u32 = 16;
const RESERVED_MASK: u32 = 0xFF;
const FUNC_MASK: u32 = 0xFFFF;

/// Call type encoded in bit 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    /// Completes synchronously without yielding to the caller.
    Fast,
    /// Standard call that may be preempted and resumed.
    Yielding,
}

/// Register width of the calling convention encoded in bit 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// 32-bit convention; only the low words of the argument registers are meaningful.
    Smc32,
    /// 64-bit convention.
    Smc64,
}

/// A decoded SMC function identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(u32);

impl FunctionId {
    /// Wrap a raw 32-bit identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Take the identifier from the `a0` register.
    ///
    /// The identifier is always a 32-bit value; the upper half of a 64-bit
    /// register is not part of it.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "function identifiers are defined as the low 32 bits of a0"
    )]
    pub const fn from_register(a0: u64) -> Self {
        Self(a0 as u32)
    }

    /// Build a 32-bit fast call identifier.
    #[must_use]
    pub const fn fast_call32(owner: u8, function: u16) -> Self {
        Self(
            FAST_CALL_BIT
                | ((owner as u32 & OWNER_MASK) << OWNER_SHIFT)
                | (function as u32 & FUNC_MASK),
        )
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Call type (bit 31).
    #[must_use]
    pub const fn call_type(self) -> CallType {
        if self.0 & FAST_CALL_BIT != 0 {
            CallType::Fast
        } else {
            CallType::Yielding
        }
    }

    /// Calling convention width (bit 30).
    #[must_use]
    pub const fn convention(self) -> Convention {
        if self.0 & SMC64_BIT != 0 {
            Convention::Smc64
        } else {
            Convention::Smc32
        }
    }

    /// Owner range (bits 29:24).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to six bits")]
    pub const fn owner(self) -> u8 {
        ((self.0 >> OWNER_SHIFT) & OWNER_MASK) as u8
    }

    /// Reserved bits 23:16, which must be zero for fast calls.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to eight bits")]
    pub const fn reserved(self) -> u8 {
        ((self.0 >> RESERVED_SHIFT) & RESERVED_MASK) as u8
    }

    /// Function number within the owner range (bits 15:0).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to sixteen bits")]
    pub const fn function(self) -> u16 {
        (self.0 & FUNC_MASK) as u16
    }
}

impl core::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Low 32 bits of an argument register under the SMC32 convention.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "SMC32 callers only define the low word"
)]
pub const fn low_word(reg: u64) -> u32 {
    reg as u32
}
