//! Physical Memory Protection (PMP) rule table.
//!
//! This module owns the per-hart PMP state: 16 configuration entries, the
//! `mseccfg` security word, and the derived physical ranges the matcher and
//! TLB hinter walk. PMP restricts physical memory access based on the
//! current privilege mode (priv. spec §3.7); the ePMP extension (Smepmp)
//! tightens the rules further once `mseccfg.MML` is latched.
//!
//! PMP supports three address-matching modes:
//! - **TOR** (Top of Range): region is `[pmpaddr[i-1] << 2, pmpaddr[i] << 2)`.
//! - **NA4**: Naturally aligned 4-byte region.
//! - **NAPOT**: Naturally aligned power-of-two region, size encoded by the
//!   trailing one bits of `pmpaddr`.
//!
//! Entries are mutated only through the CSR gateway in [`csr`]; the raw
//! mutators here recompute the derived ranges but enforce no locking.

/// Permission matching across standard PMP and ePMP semantics.
pub mod check;

/// CSR gateway (`pmpcfg*`, `pmpaddr*`, `mseccfg`).
pub mod csr;

/// TLB page-size hint and page-protection mapping.
pub mod tlb;

use crate::config::PmpConfig;

/// Number of PMP entries implemented by this unit.
///
/// The architecture allows 0, 16, or 64; this unit implements 16, matching
/// the two `pmpcfg` groups the CSR file maps at `0x3A0` and `0x3A2`.
pub const PMP_COUNT: usize = 16;

/// PMP address-matching mode field position (bits 4:3 of a cfg byte).
const A_SHIFT: u8 = 3;
const A_MASK: u8 = 0x3;

/// Read permission bit of a cfg byte.
pub const PMP_R: u8 = 1 << 0;

/// Write permission bit of a cfg byte.
pub const PMP_W: u8 = 1 << 1;

/// Execute permission bit of a cfg byte.
pub const PMP_X: u8 = 1 << 2;

/// Lock bit of a cfg byte. Locked entries bind M-mode and reject writes.
pub const PMP_L: u8 = 1 << 7;

/// Writable cfg bits. Bits 5–6 are reserved and read as zero.
const CFG_WRITE_MASK: u8 = PMP_R | PMP_W | PMP_X | (A_MASK << A_SHIFT) | PMP_L;

/// Address-matching mode extracted from a cfg byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpAddrMatch {
    /// Disabled — the entry contributes no range.
    Off = 0,
    /// Top of Range — bounded below by the previous entry's address.
    Tor = 1,
    /// Naturally aligned 4-byte region.
    Na4 = 2,
    /// Naturally aligned power-of-two region.
    Napot = 3,
}

impl PmpAddrMatch {
    /// Decodes the 2-bit A field of a cfg byte.
    pub fn from_bits(bits: u8) -> Self {
        match bits & A_MASK {
            0 => Self::Off,
            1 => Self::Tor,
            2 => Self::Na4,
            3 => Self::Napot,
            _ => unreachable!(),
        }
    }
}

/// Converts a cfg byte to its 4-bit ePMP operation code `{L, R, W, X}`.
///
/// The code indexes the Smepmp permission truth tables in [`check`] and the
/// MML write-validity set in [`csr`].
pub(crate) const fn epmp_operation(cfg: u8) -> u8 {
    ((cfg & PMP_L) >> 4) | ((cfg & PMP_R) << 2) | (cfg & PMP_W) | ((cfg & PMP_X) >> 2)
}

/// One PMP entry: raw registers plus the derived inclusive byte range.
///
/// `sa`/`ea` cache a pure function of `(cfg, addr, prev.addr)`; they are
/// refreshed by the mutators below so the per-access matcher never decodes
/// region encodings on the hot path.
#[derive(Clone, Copy, Debug, Default)]
pub struct PmpEntry {
    /// Raw configuration byte (R/W/X, A field, L).
    cfg: u8,
    /// Raw `pmpaddr` word (`addr >> 2` plus mode-dependent size bits).
    addr: u64,
    /// Derived region start (inclusive).
    sa: u64,
    /// Derived region end (inclusive).
    ea: u64,
}

impl PmpEntry {
    /// Returns the address-matching mode.
    pub fn match_mode(&self) -> PmpAddrMatch {
        PmpAddrMatch::from_bits(self.cfg >> A_SHIFT)
    }

    /// Returns true if the L (lock) bit is set.
    pub const fn is_locked(&self) -> bool {
        self.cfg & PMP_L != 0
    }

    /// Returns true if `addr` lies inside the derived region.
    const fn contains(&self, addr: u64) -> bool {
        addr >= self.sa && addr <= self.ea
    }
}

/// Physical Memory Protection unit for one hart.
///
/// Holds the rule table and `mseccfg`, and exposes the CSR gateway, the
/// per-access matcher, and the TLB page-size hint. All mutation goes through
/// the gateway; the hosting CPU model zero-initialises the unit at reset by
/// constructing a fresh instance.
#[derive(Clone, Debug)]
pub struct Pmp {
    /// The rule table.
    entries: [PmpEntry; PMP_COUNT],
    /// Count of entries whose A field is not OFF.
    num_rules: u32,
    /// ePMP security configuration word (MML/MMWP/RLB).
    mseccfg: u64,
    /// Whether PMP is implemented at all.
    enabled: bool,
    /// Whether the ePMP extension is implemented.
    epmp: bool,
    /// Whether size-zero accesses widen to the host page.
    mmu: bool,
    /// Hart ID carried on trace events.
    hart_id: u64,
}

impl Pmp {
    /// Creates a PMP unit with all entries disabled.
    pub fn new(config: &PmpConfig) -> Self {
        let mut pmp = Self {
            entries: [PmpEntry::default(); PMP_COUNT],
            num_rules: 0,
            mseccfg: 0,
            enabled: config.enabled,
            epmp: config.epmp,
            mmu: config.mmu,
            hart_id: config.hart_id,
        };
        for i in 0..PMP_COUNT {
            pmp.update_range(i);
        }
        pmp
    }

    /// Returns the configuration byte of entry `index` (zero when out of
    /// range).
    pub fn cfg(&self, index: usize) -> u8 {
        self.entries.get(index).map_or(0, |entry| entry.cfg)
    }

    /// Returns the raw address word of entry `index` (zero when out of
    /// range).
    pub fn addr(&self, index: usize) -> u64 {
        self.entries.get(index).map_or(0, |entry| entry.addr)
    }

    /// Returns the number of active (non-OFF) rules.
    pub const fn num_rules(&self) -> u32 {
        self.num_rules
    }

    /// Returns the rule table for inspection.
    pub fn entries(&self) -> &[PmpEntry] {
        &self.entries
    }

    /// Stores a configuration byte and refreshes derived state.
    ///
    /// Raw mutator: lock and validity checks happen in the CSR gateway.
    fn store_cfg(&mut self, index: usize, val: u8) {
        self.entries[index].cfg = val & CFG_WRITE_MASK;
        self.update_rule(index);
    }

    /// Stores an address word and refreshes derived state.
    ///
    /// Raw mutator: lock checks happen in the CSR gateway.
    fn store_addr(&mut self, index: usize, val: u64) {
        self.entries[index].addr = val;
        self.update_rule(index);
    }

    /// Recomputes derived state after entry `index` changed.
    ///
    /// Entry `index + 1` is refreshed as well when it is in TOR mode, since
    /// a TOR range is bounded below by its predecessor's address.
    fn update_rule(&mut self, index: usize) {
        self.update_range(index);
        if index + 1 < PMP_COUNT && self.entries[index + 1].match_mode() == PmpAddrMatch::Tor {
            self.update_range(index + 1);
        }
        self.num_rules = self
            .entries
            .iter()
            .filter(|entry| entry.match_mode() != PmpAddrMatch::Off)
            .count() as u32;
    }

    /// Recomputes the `(sa, ea)` pair of entry `index`.
    fn update_range(&mut self, index: usize) {
        let entry = self.entries[index];
        let prev_addr = if index >= 1 {
            self.entries[index - 1].addr
        } else {
            0
        };

        let (sa, ea) = match entry.match_mode() {
            // OFF entries are skipped by every walk; the all-inclusive range
            // keeps the partial-overlap test from ever seeing a half-open
            // boundary on a disabled entry.
            PmpAddrMatch::Off => (0, u64::MAX),
            PmpAddrMatch::Tor => {
                let sa = prev_addr << 2;
                let ea = (entry.addr << 2).wrapping_sub(1);
                if sa > ea { (0, 0) } else { (sa, ea) }
            }
            PmpAddrMatch::Na4 => {
                let sa = entry.addr << 2;
                (sa, sa + 3)
            }
            PmpAddrMatch::Napot => decode_napot(entry.addr),
        };

        self.entries[index].sa = sa;
        self.entries[index].ea = ea;
    }
}

/// Decodes a NAPOT `pmpaddr` word into an inclusive byte range.
///
/// ```text
/// aaaa...aaa0   8-byte range
/// aaaa...aa01   16-byte range
/// aaaa...a011   32-byte range
/// ...
/// 0111...1111   2^(XLEN+2)-byte range
/// 1111...1111   reserved (decodes to the all-inclusive range)
/// ```
const fn decode_napot(addr: u64) -> (u64, u64) {
    let a = (addr << 2) | 0b11;
    (a & a.wrapping_add(1), a | a.wrapping_add(1))
}
