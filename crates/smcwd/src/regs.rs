//! Register set of an SMC trap.

/// The eight argument/result registers of an SMC call.
///
/// The layout matches what a trap entry stub saves before calling into the
/// service, so a saved frame can be handed over without copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct SmcArgs {
    /// Function identifier on entry, status on return.
    pub a0: u64,
    /// Command code on entry; command output on return.
    pub a1: u64,
    /// Command operand on entry; command output on return.
    pub a2: u64,
    /// Unused.
    pub a3: u64,
    /// Unused.
    pub a4: u64,
    /// Unused.
    pub a5: u64,
    /// Unused.
    pub a6: u64,
    /// Client (hypervisor) identifier, preserved across the call.
    pub a7: u64,
}

impl SmcArgs {
    /// Build a register set for `function` with a command and an operand.
    #[must_use]
    pub const fn new(function: u32, a1: u64, a2: u64) -> Self {
        Self {
            a0: function as u64,
            a1,
            a2,
            a3: 0,
            a4: 0,
            a5: 0,
            a6: 0,
            a7: 0,
        }
    }

    /// Set the client identifier register.
    #[must_use]
    pub const fn with_client_id(mut self, client_id: u64) -> Self {
        self.a7 = client_id;
        self
    }

    /// Registers as an array, `a0` first.
    #[must_use]
    pub const fn to_array(&self) -> [u64; 8] {
        [
            self.a0, self.a1, self.a2, self.a3, self.a4, self.a5, self.a6, self.a7,
        ]
    }

    /// Build a register set from an array, `a0` first.
    #[must_use]
    pub const fn from_array(regs: [u64; 8]) -> Self {
        let [a0, a1, a2, a3, a4, a5, a6, a7] = regs;
        Self {
            a0,
            a1,
            a2,
            a3,
            a4,
            a5,
            a6,
            a7,
        }
    }
}

impl From<[u64; 8]> for SmcArgs {
    fn from(regs: [u64; 8]) -> Self {
        Self::from_array(regs)
    }
}
