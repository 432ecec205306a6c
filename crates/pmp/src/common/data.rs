//! Memory access types.
//!
//! Classifies guest memory accesses for permission enforcement. The hosting
//! CPU model maps each load, store, and instruction fetch to one of these
//! variants and asks the PMP unit for the corresponding privilege.

use crate::core::units::pmp::{PMP_R, PMP_W, PMP_X};

/// Type of guest memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch. Requires Execute (X) permission.
    Fetch,

    /// Data load. Requires Read (R) permission.
    Read,

    /// Data store. Requires Write (W) permission.
    Write,
}

impl AccessType {
    /// Returns the PMP privilege bit this access requires.
    ///
    /// The result is suitable as the `privs` argument of
    /// [`Pmp::check`](crate::Pmp::check).
    pub const fn required_privs(self) -> u8 {
        match self {
            Self::Fetch => PMP_X,
            Self::Read => PMP_R,
            Self::Write => PMP_W,
        }
    }
}
