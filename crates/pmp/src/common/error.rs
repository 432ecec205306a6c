//! Access-fault definitions.
//!
//! A denied PMP check is reported to the guest as a RISC-V access-fault
//! exception whose cause depends on the access type. The PMP unit itself
//! never raises traps; it returns its verdict and the hosting MMU converts a
//! denial into the matching [`AccessFault`].

use thiserror::Error;

use super::addr::PhysAddr;
use super::data::AccessType;

/// RISC-V access-fault exception raised for a denied physical access.
///
/// The associated value is the faulting physical address, reported in
/// `mtval`/`stval` by the hosting trap logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AccessFault {
    /// Instruction access fault (mcause 1).
    #[error("InstructionAccessFault({0:#x})")]
    Instruction(u64),

    /// Load access fault (mcause 5).
    #[error("LoadAccessFault({0:#x})")]
    Load(u64),

    /// Store/AMO access fault (mcause 7).
    #[error("StoreAccessFault({0:#x})")]
    Store(u64),
}

impl AccessFault {
    /// Builds the architecturally correct fault for a denied access.
    pub const fn new(addr: PhysAddr, access: AccessType) -> Self {
        match access {
            AccessType::Fetch => Self::Instruction(addr.val()),
            AccessType::Read => Self::Load(addr.val()),
            AccessType::Write => Self::Store(addr.val()),
        }
    }

    /// Returns the faulting physical address.
    pub const fn addr(self) -> u64 {
        match self {
            Self::Instruction(addr) | Self::Load(addr) | Self::Store(addr) => addr,
        }
    }
}
