//! Common types shared by the PMP unit and its hosting CPU model.
//!
//! This module provides the building blocks the rest of the crate is written
//! against:
//! 1. **Address Type:** A strong type for guest physical addresses.
//! 2. **Constants:** Host page geometry used by the matcher and TLB hinter.
//! 3. **Memory Access:** Classification of accesses (Fetch/Read/Write) and
//!    their required PMP privileges.
//! 4. **Error Handling:** The access-fault type the hosting MMU raises when a
//!    check denies an access.

/// Physical address type.
pub mod addr;

/// Page geometry constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Access-fault definitions.
pub mod error;

pub use addr::PhysAddr;
pub use constants::{PAGE_MASK, PAGE_OFFSET_MASK, PAGE_SHIFT, PAGE_SIZE};
pub use data::AccessType;
pub use error::AccessFault;
