//! # smcwd
//!
//! Watchdog management exposed to the normal world through secure monitor
//! calls.
//!
//! A trusted execution environment owns the platform watchdog; the rich OS
//! drives it with SMCs in the trusted-OS extra-services range. This crate
//! provides:
//! - `AuthorizationGate` deciding which function IDs belong to the service
//! - `WatchdogService` state machine owning the watchdog context
//! - `WatchdogCall` / `WatchdogReply` register marshaling
//! - `WatchdogDriver` trait for the hardware timer
//! - `SimulatedWatchdog` for tests and hardware-free environments
//! - `SharedSmcHandler` serializing calls from several cores (`std` feature)
//!
//! ## Register Interface
//!
//! | Register | Call                         | Return                       |
//! |----------|------------------------------|------------------------------|
//! | `a0`     | function ID (`0xBC000000`)   | status code                  |
//! | `a1`     | command                      | `min` (INIT) / time left     |
//! | `a2`     | operand                      | `max` (INIT) / time left     |
//! | `a7`     | client ID                    | client ID                    |
//!
//! ## State Machine
//!
//! ```text
//!                  INIT                 ENABLE(1)
//! Uninitialized ────────► Disabled ─────────────► Enabled
//!                            ▲   ◄───────────────   │
//!                            │      ENABLE(0)       │
//!                            └──────── INIT ────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use smcwd::prelude::*;
//!
//! let mut handler = WatchdogSmcHandler::new(SimulatedWatchdog::with_bounds(1, 300));
//!
//! let mut args = SmcArgs::new(SMC_WATCHDOG, u64::from(SMCWD_INIT), 0);
//! handler.handle(&mut args);
//! assert_eq!(SmcStatus::from_register(args.a0), Some(SmcStatus::Success));
//! assert_eq!((args.a1, args.a2), (1, 300));
//!
//! let mut args = SmcArgs::new(SMC_WATCHDOG, u64::from(SMCWD_SET_TIMEOUT), 30);
//! handler.handle(&mut args);
//! let mut args = SmcArgs::new(SMC_WATCHDOG, u64::from(SMCWD_ENABLE), 1);
//! handler.handle(&mut args);
//! assert_eq!(handler.state(), WatchdogState::Enabled);
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod abi;
pub mod command;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod gate;
pub mod handler;
pub mod prelude;
pub mod regs;
pub mod service;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod shared;
pub mod sim;
pub mod stats;
pub mod status;

pub use abi::{FunctionId, SMC_EXTRA_CALLS_COUNT, SMC_WATCHDOG};
pub use command::{Command, ReplyData, WatchdogCall, WatchdogReply};
pub use config::ServiceConfig;
pub use context::{WatchdogContext, WatchdogState};
pub use driver::{TimeoutBounds, WatchdogDriver};
pub use error::{ConfigError, DriverError, ServiceError, ServiceResult};
pub use gate::{AuthorizationGate, GateDecision};
pub use handler::{Disposition, WatchdogSmcHandler};
pub use regs::SmcArgs;
pub use service::WatchdogService;
#[cfg(feature = "std")]
pub use shared::SharedSmcHandler;
pub use sim::SimulatedWatchdog;
pub use stats::ServiceStats;
pub use status::SmcStatus;
