//! Call authorization gate.
//!
//! The gate looks only at `a0` and decides whether the call belongs to this
//! service. It is pure and total: every register value maps to a decision and
//! nothing is read from or written to the watchdog context.

use crate::abi::{CallType, Convention, FUNC_EXTRA_CALLS_COUNT, FunctionId, OWNER_TRUSTED_OS_EXTRA};
use crate::config::ServiceConfig;
use crate::regs::SmcArgs;

/// Function of the extra-services range selected by an accepted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraFunction {
    /// The watchdog management service.
    Watchdog,
    /// Number of extra services exposed.
    CallsCount,
}

/// Why a call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Owner field is not the extra-services range.
    WrongOwner(u8),
    /// Yielding call where a fast call is required.
    NotFastCall,
    /// SMC64 convention where SMC32 is required.
    WrongConvention,
    /// Reserved bits 23:16 are not zero.
    ReservedBitsSet,
    /// Function number not served here.
    UnknownFunction(u16),
}

impl RejectReason {
    /// Short description used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WrongOwner(_) => "wrong owner range",
            Self::NotFastCall => "not a fast call",
            Self::WrongConvention => "not an SMC32 call",
            Self::ReservedBitsSet => "reserved bits set",
            Self::UnknownFunction(_) => "unknown function",
        }
    }
}

/// Gate decision for an incoming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The call is served by this service.
    Accepted(ExtraFunction),
    /// The call is not served; the caller gets NOT_SUPPORTED.
    Rejected(RejectReason),
}

impl GateDecision {
    /// Whether the call was accepted.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Authorization gate for the extra-services range.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationGate {
    watchdog_function: u16,
    answer_calls_count: bool,
}

impl AuthorizationGate {
    /// Create a gate for the given configuration.
    #[must_use]
    pub const fn new(config: &ServiceConfig) -> Self {
        Self {
            watchdog_function: config.watchdog_function,
            answer_calls_count: config.answer_calls_count,
        }
    }

    /// Classify a call by its registers.
    #[must_use]
    pub const fn check(&self, args: &SmcArgs) -> GateDecision {
        self.check_id(FunctionId::from_register(args.a0))
    }

    /// Classify a function identifier.
    #[must_use]
    pub const fn check_id(&self, id: FunctionId) -> GateDecision {
        if id.owner() != OWNER_TRUSTED_OS_EXTRA {
            return GateDecision::Rejected(RejectReason::WrongOwner(id.owner()));
        }
        if !matches!(id.call_type(), CallType::Fast) {
            return GateDecision::Rejected(RejectReason::NotFastCall);
        }
        if !matches!(id.convention(), Convention::Smc32) {
            return GateDecision::Rejected(RejectReason::WrongConvention);
        }
        if id.reserved() != 0 {
            return GateDecision::Rejected(RejectReason::ReservedBitsSet);
        }

        let function = id.function();
        if function == self.watchdog_function {
            GateDecision::Accepted(ExtraFunction::Watchdog)
        } else if function == FUNC_EXTRA_CALLS_COUNT && self.answer_calls_count {
            GateDecision::Accepted(ExtraFunction::CallsCount)
        } else {
            GateDecision::Rejected(RejectReason::UnknownFunction(function))
        }
    }
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
