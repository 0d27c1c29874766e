//! Prelude for smcwd.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use smcwd::prelude::*;
//!
//! let mut service = WatchdogService::new(SimulatedWatchdog::default());
//! assert_eq!(service.pet(), Err(ServiceError::Disabled));
//! ```

pub use crate::abi::{FunctionId, SMC_EXTRA_CALLS_COUNT, SMC_WATCHDOG};
pub use crate::command::{
    Command, ReplyData, SMCWD_ENABLE, SMCWD_GET_TIMELEFT, SMCWD_INIT, SMCWD_PET,
    SMCWD_SET_TIMEOUT, WatchdogCall, WatchdogReply,
};
pub use crate::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::context::{WatchdogContext, WatchdogState};
pub use crate::driver::{TimeoutBounds, WatchdogDriver};
pub use crate::error::{
    ConfigError, DriverError, DriverResult, InvalidReason, ServiceError, ServiceResult,
};
pub use crate::gate::{AuthorizationGate, ExtraFunction, GateDecision, RejectReason};
pub use crate::handler::{Disposition, WatchdogSmcHandler};
pub use crate::regs::SmcArgs;
pub use crate::service::WatchdogService;
#[cfg(feature = "std")]
pub use crate::shared::SharedSmcHandler;
pub use crate::sim::{DriverOp, FaultKind, SimulatedWatchdog};
pub use crate::stats::ServiceStats;
pub use crate::status::SmcStatus;
