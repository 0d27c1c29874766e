//! Register marshaling for watchdog calls.
//!
//! Decoding turns `a1`/`a2`/`a7` into a [`WatchdogCall`]; encoding writes a
//! [`WatchdogReply`] back into `a0`–`a2`. Neither direction touches the
//! watchdog context.

use crate::abi::low_word;
use crate::regs::SmcArgs;
use crate::status::SmcStatus;

/// Raw command code of INIT.
pub const SMCWD_INIT: u32 = 0;
/// Raw command code of SET_TIMEOUT.
pub const SMCWD_SET_TIMEOUT: u32 = 1;
/// Raw command code of ENABLE.
pub const SMCWD_ENABLE: u32 = 2;
/// Raw command code of PET.
pub const SMCWD_PET: u32 = 3;
/// Raw command code of GET_TIMELEFT.
pub const SMCWD_GET_TIMELEFT: u32 = 4;

/// Watchdog command selected by `a1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Initialize the watchdog and report its bounds.
    Init,
    /// Set the timeout in seconds.
    SetTimeout(u32),
    /// Start (1) or stop (0) the watchdog; any other value is kept for validation.
    Enable(u32),
    /// Refresh the countdown.
    Pet,
    /// Report the seconds left before expiry.
    GetTimeLeft,
    /// Any other command code.
    Unknown(u32),
}

impl Command {
    /// Decode a command from its code and operand word.
    ///
    /// The operand is only retained for commands that consume one.
    #[must_use]
    pub const fn decode(code: u32, operand: u32) -> Self {
        match code {
            SMCWD_INIT => Self::Init,
            SMCWD_SET_TIMEOUT => Self::SetTimeout(operand),
            SMCWD_ENABLE => Self::Enable(operand),
            SMCWD_PET => Self::Pet,
            SMCWD_GET_TIMELEFT => Self::GetTimeLeft,
            other => Self::Unknown(other),
        }
    }

    /// Raw command code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Init => SMCWD_INIT,
            Self::SetTimeout(_) => SMCWD_SET_TIMEOUT,
            Self::Enable(_) => SMCWD_ENABLE,
            Self::Pet => SMCWD_PET,
            Self::GetTimeLeft => SMCWD_GET_TIMELEFT,
            Self::Unknown(code) => code,
        }
    }

    /// Command name as used in the interface documentation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::SetTimeout(_) => "SET_TIMEOUT",
            Self::Enable(_) => "ENABLE",
            Self::Pet => "PET",
            Self::GetTimeLeft => "GET_TIMELEFT",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// A decoded watchdog call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogCall {
    /// Requested command.
    pub command: Command,
    /// Client identifier from `a7`, returned untouched.
    pub client_id: u64,
}

impl WatchdogCall {
    /// Decode the call from the trap registers.
    ///
    /// Watchdog calls use the SMC32 convention, so only the low words of
    /// `a1` and `a2` are read.
    #[must_use]
    pub const fn decode(args: &SmcArgs) -> Self {
        Self {
            command: Command::decode(low_word(args.a1), low_word(args.a2)),
            client_id: args.a7,
        }
    }
}

/// Command-specific output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyData {
    /// Status only.
    None,
    /// INIT result: bounds in `a1` (min) and `a2` (max).
    Bounds {
        /// Minimum timeout in seconds.
        min: u32,
        /// Maximum timeout in seconds.
        max: u32,
    },
    /// GET_TIMELEFT result in `a2`.
    TimeLeft(u32),
}

/// Outcome of a watchdog call, ready to be written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogReply {
    /// Status for `a0`.
    pub status: SmcStatus,
    /// Output values for `a1`/`a2`.
    pub data: ReplyData,
    /// Client identifier for `a7`.
    pub client_id: u64,
}

impl WatchdogReply {
    /// Reply carrying only a status.
    #[must_use]
    pub const fn status_only(status: SmcStatus, client_id: u64) -> Self {
        Self {
            status,
            data: ReplyData::None,
            client_id,
        }
    }

    /// Write the reply into the trap registers.
    ///
    /// `a3`–`a6` are left as they are. When `mirror_time_left` is set the
    /// GET_TIMELEFT value is written to `a1` as well as `a2`.
    pub fn encode(&self, args: &mut SmcArgs, mirror_time_left: bool) {
        args.a0 = self.status.to_register();
        match self.data {
            ReplyData::None => {}
            ReplyData::Bounds { min, max } => {
                args.a1 = u64::from(min);
                args.a2 = u64::from(max);
            }
            ReplyData::TimeLeft(seconds) => {
                args.a2 = u64::from(seconds);
                if mirror_time_left {
                    args.a1 = u64::from(seconds);
                }
            }
        }
        args.a7 = self.client_id;
    }
}
