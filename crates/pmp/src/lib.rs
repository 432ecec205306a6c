//! RISC-V Physical Memory Protection (PMP/ePMP) enforcement library.
//!
//! This crate implements the PMP subsystem of a RISC-V hart for use inside a
//! CPU emulator, covering the following:
//! 1. **Rule table:** 16 configuration entries with precomputed physical
//!    address ranges for the TOR/NA4/NAPOT matching modes.
//! 2. **CSR gateway:** `pmpcfg*`/`pmpaddr*`/`mseccfg` read and write
//!    semantics, including locking, sticky security bits, and ePMP validity.
//! 3. **Matcher:** per-access permission checks across standard PMP and the
//!    Enhanced PMP (Smepmp) truth tables.
//! 4. **TLB hinter:** the page-size hint the hosting MMU uses to decide
//!    whether a permission result may be cached for a whole page.
//!
//! The hosting CPU model owns privilege mode, CSR dispatch, and trap
//! delivery; this crate only decides whether a physical access is permitted.

/// Common types (addresses, access kinds, faults, constants).
pub mod common;
/// PMP unit configuration (defaults, JSON deserialization).
pub mod config;
/// Core components (architectural register definitions, the PMP unit).
pub mod core;

/// Unit configuration; use `PmpConfig::default()` or deserialize from JSON.
pub use crate::config::PmpConfig;
/// The PMP unit itself; one instance per hart.
pub use crate::core::units::pmp::Pmp;
/// Outcome of a permission check (verdict plus effective privileges).
pub use crate::core::units::pmp::check::{CheckResult, PmpVerdict};
/// Host-TLB maintenance marker returned by `pmpcfg` writes.
pub use crate::core::units::pmp::csr::TlbFlush;
