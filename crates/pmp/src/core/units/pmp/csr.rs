//! CSR gateway for the PMP register file.
//!
//! Translates reads and writes of `pmpcfg*`, `pmpaddr*`, and `mseccfg` into
//! individual rule-table updates, enforcing the architectural write rules:
//! 1. **Locking:** Entries with the L bit set reject writes unless ePMP's
//!    Rule-Lock Bypass is active.
//! 2. **Stickiness:** `mseccfg.MML` and `mseccfg.MMWP` never clear once set,
//!    and RLB cannot be re-enabled while any entry is locked.
//! 3. **ePMP validity:** Once MML is latched, cfg bytes that would add an
//!    executable M-mode-only or locked Shared-Region rule are rejected.
//!
//! Rejected writes are WARL: state is preserved and a line is emitted on the
//! guest-error channel. Every operation also emits a trace event carrying
//! the hart ID, register index, and value.

use tracing::{trace, warn};

use super::{PMP_COUNT, Pmp, PmpAddrMatch, PmpEntry, epmp_operation};
use crate::core::arch::csr::{MSECCFG_MML, MSECCFG_MMWP, MSECCFG_RLB};

/// Packed cfg bytes carried by one `pmpcfg` register on RV64 (`2 << MXL`).
const PMPCFG_BYTES: usize = 8;

/// Host-TLB maintenance required after a PMP register update.
///
/// The MMU caches permission results in its TLB; when a write changes what
/// an address range permits, those cached translations go stale. The
/// hosting CPU must treat [`TlbFlush::Required`] as a synchronous
/// invalidation of this hart's cached translations.
#[must_use = "cached translations go stale when a flush is required"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlbFlush {
    /// Cached translations for this hart must be discarded.
    Required,
    /// No invalidation is mandated; the host may still flush.
    NotRequired,
}

impl Pmp {
    /// Writes a `pmpcfg` register: `reg_index` selects a group of four
    /// entries, and `value` carries eight packed cfg bytes (so on RV64 the
    /// valid indices are the even ones).
    ///
    /// Bytes targeting locked or out-of-range entries, and bytes rejected by
    /// the ePMP validity rule, are ignored individually.
    pub fn pmpcfg_write(&mut self, reg_index: usize, value: u64) -> TlbFlush {
        trace!(target: "pmp", hart = self.hart_id, index = reg_index, value, "pmpcfg_write");

        for i in 0..PMPCFG_BYTES {
            let cfg_val = (value >> (8 * i)) as u8;
            self.write_cfg(reg_index * 4 + i, cfg_val);
        }

        TlbFlush::Required
    }

    /// Reads a `pmpcfg` register, repacking the group's cfg bytes
    /// little-endian. Out-of-range entries read as zero.
    pub fn pmpcfg_read(&self, reg_index: usize) -> u64 {
        let mut value = 0u64;
        for i in 0..PMPCFG_BYTES {
            value |= u64::from(self.cfg(reg_index * 4 + i)) << (8 * i);
        }
        trace!(target: "pmp", hart = self.hart_id, index = reg_index, value, "pmpcfg_read");
        value
    }

    /// Writes `pmpaddr[index]`.
    ///
    /// Rejected when entry `index` is locked, and also when entry
    /// `index + 1` is locked and in TOR mode: its range is bounded by this
    /// address, so the write would silently resize a locked region.
    pub fn pmpaddr_write(&mut self, index: usize, value: u64) {
        trace!(target: "pmp", hart = self.hart_id, index, value, "pmpaddr_write");

        if index >= PMP_COUNT {
            warn!(target: "guest_error", "ignoring pmpaddr write - out of bounds");
            return;
        }

        if index + 1 < PMP_COUNT
            && !self.entry_writable(index + 1)
            && self.entries[index + 1].match_mode() == PmpAddrMatch::Tor
        {
            warn!(target: "guest_error", "ignoring pmpaddr write - pmpcfg + 1 locked");
            return;
        }

        if self.entry_writable(index) {
            self.store_addr(index, value);
        } else {
            warn!(target: "guest_error", "ignoring pmpaddr write - locked");
        }
    }

    /// Reads `pmpaddr[index]`. Out-of-range indices read as zero.
    pub fn pmpaddr_read(&self, index: usize) -> u64 {
        if index < PMP_COUNT {
            let value = self.addr(index);
            trace!(target: "pmp", hart = self.hart_id, index, value, "pmpaddr_read");
            value
        } else {
            warn!(target: "guest_error", "ignoring pmpaddr read - out of bounds");
            0
        }
    }

    /// Writes `mseccfg`, preserving sticky bits.
    ///
    /// MML and MMWP latch once set. RLB is dropped from the incoming value
    /// when it is currently clear and any entry is locked.
    pub fn mseccfg_write(&mut self, value: u64) -> TlbFlush {
        trace!(target: "pmp", hart = self.hart_id, value, "mseccfg_write");

        let mut value = value;
        if self.mseccfg & MSECCFG_RLB == 0 && self.entries.iter().any(PmpEntry::is_locked) {
            value &= !MSECCFG_RLB;
        }
        value |= self.mseccfg & (MSECCFG_MMWP | MSECCFG_MML);
        self.mseccfg = value;

        TlbFlush::NotRequired
    }

    /// Reads `mseccfg`.
    pub fn mseccfg_read(&self) -> u64 {
        trace!(target: "pmp", hart = self.hart_id, value = self.mseccfg, "mseccfg_read");
        self.mseccfg
    }

    /// Writes one cfg byte, enforcing bounds, locking, and ePMP validity.
    fn write_cfg(&mut self, index: usize, val: u8) {
        if index >= PMP_COUNT {
            warn!(target: "guest_error", "ignoring pmpcfg write - out of bounds");
            return;
        }
        if !self.entry_writable(index) {
            warn!(target: "guest_error", "ignoring pmpcfg write - locked");
            return;
        }
        if self.epmp && !self.valid_epmp_cfg(val) {
            warn!(target: "guest_error", "ignoring pmpcfg write - invalid");
            return;
        }
        self.store_cfg(index, val);
    }

    /// Returns true when entry `index` accepts writes: RLB bypasses every
    /// lock, otherwise the entry must not be locked.
    fn entry_writable(&self, index: usize) -> bool {
        if self.epmp && self.mseccfg & MSECCFG_RLB != 0 {
            return true;
        }
        !self.entries[index].is_locked()
    }

    /// Returns true when `val` may be written under the current security
    /// configuration.
    ///
    /// Once MML is latched (and RLB is clear), operation codes 9, 10, 11,
    /// and 13 (executable M-mode-only or locked Shared-Region rules) can
    /// no longer be added.
    fn valid_epmp_cfg(&self, val: u8) -> bool {
        if self.mseccfg & MSECCFG_MML == 0 || self.mseccfg & MSECCFG_RLB != 0 {
            return true;
        }
        !matches!(epmp_operation(val), 9 | 10 | 11 | 13)
    }
}
