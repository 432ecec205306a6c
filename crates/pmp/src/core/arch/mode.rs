//! RISC-V privilege modes.
//!
//! PMP verdicts depend on the privilege the access executes at: M-mode
//! bypasses unlocked rules under standard PMP, while ePMP assigns M-mode and
//! S/U-mode separate rows of the permission truth table.

/// RISC-V privilege mode of the hart issuing an access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrivilegeMode {
    /// User mode (U-mode), the lowest privilege level.
    User = 0,

    /// Supervisor mode (S-mode).
    Supervisor = 1,

    /// Machine mode (M-mode), the highest privilege level.
    Machine = 3,
}

impl PrivilegeMode {
    /// Decodes a privilege mode from its architectural encoding.
    ///
    /// Invalid encodings decode as `Machine`, mirroring how the hosting CPU
    /// treats reserved mode values.
    pub const fn from_u8(val: u8) -> Self {
        match val {
            0 => Self::User,
            1 => Self::Supervisor,
            _ => Self::Machine,
        }
    }

    /// Returns true for M-mode.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Machine)
    }

    /// Returns the human-readable mode name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
