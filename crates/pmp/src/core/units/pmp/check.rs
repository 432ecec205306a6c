//! Per-access permission matching.
//!
//! The matcher walks the rule table in priority order (low index wins) and
//! produces a verdict plus the privileges the winning rule grants. Standard
//! PMP masks the entry's R/W/X bits (with M-mode bypassing unlocked rules),
//! while ePMP (once `mseccfg.MML` is latched) looks permissions up in the
//! Smepmp truth table, keyed by the 4-bit `{L,R,W,X}` operation code with
//! separate rows for M-mode and S/U-mode.
//!
//! An access that is only partially inside a rule's range is denied outright
//! and no lower-priority rule is consulted, as the privileged spec requires.

use tracing::warn;

use super::{PMP_R, PMP_W, PMP_X, Pmp, PmpAddrMatch, PmpEntry, epmp_operation};
use crate::common::addr::PhysAddr;
use crate::common::constants::{PAGE_MASK, WORD_SIZE};
use crate::core::arch::csr::{MSECCFG_MML, MSECCFG_MMWP};
use crate::core::arch::mode::PrivilegeMode;

const RWX: u8 = PMP_R | PMP_W | PMP_X;

/// M-mode permissions by ePMP operation code (`{L,R,W,X}`).
const EPMP_M_PRIVS: [u8; 16] = [
    0,             // 0b0000
    0,             // 0b0001
    PMP_R | PMP_W, // 0b0010 shared data region
    PMP_R | PMP_W, // 0b0011
    0,             // 0b0100
    0,             // 0b0101
    0,             // 0b0110
    0,             // 0b0111
    0,             // 0b1000
    PMP_X,         // 0b1001 shared code region
    PMP_X,         // 0b1010
    PMP_R | PMP_X, // 0b1011
    PMP_R,         // 0b1100
    PMP_R | PMP_X, // 0b1101
    PMP_R | PMP_W, // 0b1110
    PMP_R,         // 0b1111 shared read-only region
];

/// S/U-mode permissions by ePMP operation code.
const EPMP_SU_PRIVS: [u8; 16] = [
    0,                     // 0b0000
    PMP_X,                 // 0b0001
    PMP_R,                 // 0b0010 shared data region
    PMP_R | PMP_W,         // 0b0011
    PMP_R,                 // 0b0100
    PMP_R | PMP_X,         // 0b0101
    PMP_R | PMP_W,         // 0b0110
    RWX,                   // 0b0111
    0,                     // 0b1000
    PMP_X,                 // 0b1001 shared code region
    PMP_X,                 // 0b1010
    PMP_X,                 // 0b1011
    0,                     // 0b1100
    0,                     // 0b1101
    0,                     // 0b1110
    PMP_R,                 // 0b1111 shared read-only region
];

/// Verdict of a permission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpVerdict {
    /// The access was fully contained in the rule at this index.
    Match(usize),

    /// No rule overlapped the access and the default policy allowed it.
    Default,

    /// The access straddled a rule boundary. Denied without consulting
    /// lower-priority rules.
    PartialOverlap,

    /// No rule matched and the default policy denied the access.
    NoMatch,
}

/// Result of a permission check.
///
/// `allowed_privs` holds the privileges the winning rule (or the default
/// policy) grants; the caller compares them against the privileges the
/// access requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckResult {
    /// Which rule, if any, decided the verdict.
    pub verdict: PmpVerdict,
    /// Union of the granted PMP privilege bits.
    pub allowed_privs: u8,
}

impl CheckResult {
    /// Returns true when every requested privilege is granted.
    pub const fn permits(&self, requested_privs: u8) -> bool {
        requested_privs & !self.allowed_privs == 0
    }

    const fn denied(verdict: PmpVerdict) -> Self {
        Self {
            verdict,
            allowed_privs: 0,
        }
    }
}

impl Pmp {
    /// Checks whether an access at `addr` is permitted.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical address of the access.
    /// * `size` - Access length in bytes. Zero means "unknown": with an MMU
    ///   the access is assumed to span to the end of the host page, without
    ///   one it is widened to the natural word size.
    /// * `privs` - Privileges the access requires (see
    ///   [`AccessType::required_privs`](crate::common::AccessType::required_privs)).
    /// * `mode` - Privilege mode the access executes at.
    ///
    /// # Returns
    ///
    /// The verdict plus the granted privileges. Rules are consulted lowest
    /// index first; the first rule fully containing the access decides.
    pub fn check(
        &self,
        addr: PhysAddr,
        size: u64,
        privs: u8,
        mode: PrivilegeMode,
    ) -> CheckResult {
        let addr = addr.val();

        // Short cut if no rules.
        if self.num_rules == 0 {
            return self.check_default(privs, mode);
        }

        let pmp_size = if size == 0 {
            if self.mmu {
                // Unknown size: assume every byte up to the end of the host
                // page is accessed, so any rule starting inside the page is
                // caught.
                (addr | PAGE_MASK).wrapping_neg()
            } else {
                WORD_SIZE
            }
        } else {
            size
        };
        let last = addr.wrapping_add(pmp_size).wrapping_sub(1);

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.match_mode() == PmpAddrMatch::Off {
                continue;
            }

            let in_start = entry.contains(addr);
            let in_end = entry.contains(last);

            if in_start != in_end {
                warn!(target: "guest_error", "pmp violation - access is partially inside");
                return CheckResult::denied(PmpVerdict::PartialOverlap);
            }

            if in_start && in_end {
                return CheckResult {
                    verdict: PmpVerdict::Match(index),
                    allowed_privs: self.match_privs(entry, mode),
                };
            }
        }

        self.check_default(privs, mode)
    }

    /// Permissions granted by a matched rule.
    fn match_privs(&self, entry: &PmpEntry, mode: PrivilegeMode) -> u8 {
        if self.mml_set() {
            let operation = usize::from(epmp_operation(entry.cfg));
            if mode.is_machine() {
                EPMP_M_PRIVS[operation]
            } else {
                EPMP_SU_PRIVS[operation]
            }
        } else {
            // M-mode ignores unlocked rules; every other mode, and M-mode
            // under a locked rule, takes the entry's R/W/X bits.
            let mut allowed = RWX;
            if !mode.is_machine() || entry.is_locked() {
                allowed &= entry.cfg & RWX;
            }
            allowed
        }
    }

    /// Default policy when no rule overlaps the access.
    fn check_default(&self, privs: u8, mode: PrivilegeMode) -> CheckResult {
        if self.mmwp_set() {
            // Whitelist policy: deny everything no rule covers, even M-mode.
            return CheckResult::denied(PmpVerdict::NoMatch);
        }
        if self.mml_set() {
            // Lockdown: M-mode keeps non-execute access, other modes lose
            // everything. Executing in M-mode now requires a matching rule.
            if mode.is_machine() && privs & PMP_X == 0 {
                return CheckResult {
                    verdict: PmpVerdict::Default,
                    allowed_privs: PMP_R | PMP_W,
                };
            }
            return CheckResult::denied(PmpVerdict::NoMatch);
        }
        if !self.enabled || mode.is_machine() {
            // Priv. spec v1.10: with no PMP implemented, or no rule matching
            // an M-mode access, the access succeeds.
            return CheckResult {
                verdict: PmpVerdict::Default,
                allowed_privs: RWX,
            };
        }
        CheckResult::denied(PmpVerdict::NoMatch)
    }

    /// Machine-Mode Lockdown is latched.
    fn mml_set(&self) -> bool {
        self.epmp && self.mseccfg & MSECCFG_MML != 0
    }

    /// Machine-Mode Whitelist Policy is latched.
    fn mmwp_set(&self) -> bool {
        self.epmp && self.mseccfg & MSECCFG_MMWP != 0
    }
}
