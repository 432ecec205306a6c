//! PMP-related CSR addresses and field masks.
//!
//! The hosting CPU's CSR dispatch layer routes these addresses to the PMP
//! unit's gateway operations. On RV64 only the even `pmpcfg` registers exist;
//! each carries eight packed configuration bytes.

/// `pmpcfg0` CSR address (entries 0–7 on RV64).
pub const PMPCFG0: u32 = 0x3A0;

/// `pmpcfg2` CSR address (entries 8–15 on RV64).
pub const PMPCFG2: u32 = 0x3A2;

/// `pmpaddr0` CSR address.
pub const PMPADDR0: u32 = 0x3B0;

/// `pmpaddr15` CSR address (last entry implemented by this unit).
pub const PMPADDR15: u32 = 0x3BF;

/// `mseccfg` CSR address (ePMP security configuration).
pub const MSECCFG: u32 = 0x747;

/// Machine-Mode Lockdown bit in `mseccfg`. Sticky: once set, it activates
/// the ePMP permission truth table for the lifetime of the hart.
pub const MSECCFG_MML: u64 = 1 << 0;

/// Machine-Mode Whitelist Policy bit in `mseccfg`. Sticky: once set, M-mode
/// accesses with no matching rule are denied.
pub const MSECCFG_MMWP: u64 = 1 << 1;

/// Rule-Lock Bypass bit in `mseccfg`. While set, locked entries remain
/// writable; it cannot be re-enabled once cleared while any entry is locked.
pub const MSECCFG_RLB: u64 = 1 << 2;
