//! TLB page-size hint.
//!
//! A PMP region may cover only part of a host page, splitting the page into
//! areas with different permissions. If PMP0 is `[0x8000_0008, 0x8000_000F]`
//! read-only and PMP1 grants RWX over the whole page, a write to
//! `0x8000_0000` matches PMP1, but caching that translation page-wide would
//! let a later write to `0x8000_0008` bypass PMP0. The hint tells the MMU
//! whether a whole page may be cached or every byte must be re-checked.

use super::{PMP_R, PMP_W, PMP_X, Pmp, PmpAddrMatch};
use crate::common::addr::PhysAddr;
use crate::common::constants::PAGE_SIZE;

/// Read bit of an MMU page-protection word.
pub const PROT_READ: u8 = 1 << 0;

/// Write bit of an MMU page-protection word.
pub const PROT_WRITE: u8 = 1 << 1;

/// Execute bit of an MMU page-protection word.
pub const PROT_EXEC: u8 = 1 << 2;

impl Pmp {
    /// Returns how many bytes of `addr`'s page a single TLB entry may cover:
    /// [`PAGE_SIZE`] when no region splits the page, 1 otherwise.
    ///
    /// Only the first entry touching the page matters: it has the highest
    /// priority for every address it covers, and if it covers the page only
    /// partially, the remaining addresses fall to lower-priority rules or
    /// the default policy, which the MMU must then re-evaluate per byte.
    pub fn tlb_page_size(&self, addr: PhysAddr) -> u64 {
        let page_sa = addr.page_base();
        let page_ea = page_sa + (PAGE_SIZE - 1);

        // Without PMP, or without active rules, the page cannot be split.
        if !self.enabled || self.num_rules == 0 {
            return PAGE_SIZE;
        }

        for entry in &self.entries {
            if entry.match_mode() == PmpAddrMatch::Off {
                continue;
            }

            if entry.sa <= page_sa && entry.ea >= page_ea {
                return PAGE_SIZE;
            }
            if (entry.sa >= page_sa && entry.sa <= page_ea)
                || (entry.ea >= page_sa && entry.ea <= page_ea)
            {
                return 1;
            }
        }

        PAGE_SIZE
    }
}

/// Converts PMP privileges to MMU page-protection bits.
pub fn page_prot_from_privs(privs: u8) -> u8 {
    let mut prot = 0;
    if privs & PMP_R != 0 {
        prot |= PROT_READ;
    }
    if privs & PMP_W != 0 {
        prot |= PROT_WRITE;
    }
    if privs & PMP_X != 0 {
        prot |= PROT_EXEC;
    }
    prot
}
