//! Architecture-specific definitions.
//!
//! CSR addresses and field masks for the PMP register file, and the RISC-V
//! privilege modes the matcher distinguishes.

/// PMP-related CSR addresses and `mseccfg` field masks.
pub mod csr;

/// RISC-V privilege modes.
pub mod mode;
