//! Rule-Table Unit Tests.
//!
//! Verifies address-range derivation for the TOR/NA4/NAPOT modes, the TOR
//! cross-entry dependency, reserved-bit masking, and rule counting. Derived
//! ranges are probed through `check`, since they are not externally visible.

use rvpmp_core::common::PhysAddr;
use rvpmp_core::core::units::pmp::PmpAddrMatch;
use rvpmp_core::{PmpVerdict, TlbFlush};

use crate::common::{A_NA4, A_NAPOT, A_TOR, L, M, R, U, W, X, napot, pmp, set_cfg_byte, set_entry};

#[test]
fn fresh_unit_has_no_rules() {
    let pmp = pmp();
    assert_eq!(pmp.num_rules(), 0);
    for i in 0..16 {
        assert_eq!(pmp.pmpaddr_read(i), 0);
    }
    assert_eq!(pmp.pmpcfg_read(0), 0);
    assert_eq!(pmp.pmpcfg_read(2), 0);
}

#[test]
fn num_rules_counts_active_entries() {
    let mut pmp = pmp();
    set_entry(&mut pmp, 0, R | A_NAPOT, napot(0x1000, 8));
    set_entry(&mut pmp, 3, R | W | A_TOR, 0x2000);
    set_entry(&mut pmp, 9, X | A_NA4, 0x8000);
    assert_eq!(pmp.num_rules(), 3);

    // Turning an entry OFF drops it from the count.
    set_cfg_byte(&mut pmp, 3, 0);
    assert_eq!(pmp.num_rules(), 2);
}

#[test]
fn off_entry_never_matches() {
    let mut pmp = pmp();
    // R/W/X bits without an A field leave the entry disabled.
    set_entry(&mut pmp, 0, R | W | X, napot(0x1000, 8));
    assert_eq!(pmp.num_rules(), 0);

    let result = pmp.check(PhysAddr::new(0x1000), 4, R, U);
    assert_eq!(result.verdict, PmpVerdict::NoMatch);
}

#[test]
fn entry_accessors_reflect_programmed_state() {
    let mut pmp = pmp();
    set_entry(&mut pmp, 0, R | A_NAPOT | L, napot(0x1000, 8));
    set_entry(&mut pmp, 1, R | A_TOR, 0x2000);

    let entries = pmp.entries();
    assert!(entries[0].is_locked());
    assert_eq!(entries[0].match_mode(), PmpAddrMatch::Napot);
    assert!(!entries[1].is_locked());
    assert_eq!(entries[1].match_mode(), PmpAddrMatch::Tor);
}

#[test]
fn reserved_cfg_bits_read_as_zero() {
    let mut pmp = pmp();
    set_cfg_byte(&mut pmp, 0, 0x60 | R | A_NAPOT);
    assert_eq!(pmp.cfg(0), R | A_NAPOT);
}

#[test]
fn napot_eight_byte_region_boundaries() {
    let mut pmp = pmp();
    // [0x1000, 0x1007]
    set_entry(&mut pmp, 0, R | A_NAPOT, napot(0x1000, 8));

    assert_eq!(
        pmp.check(PhysAddr::new(0x1000), 8, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x1007), 1, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x0FFF), 1, R, U).verdict,
        PmpVerdict::NoMatch
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x1008), 1, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn napot_large_region_boundaries() {
    let mut pmp = pmp();
    // [0x8000_0000, 0x8000_FFFF]
    set_entry(&mut pmp, 0, R | A_NAPOT, napot(0x8000_0000, 0x1_0000));

    assert_eq!(
        pmp.check(PhysAddr::new(0x8000_0000), 1, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x8000_FFFF), 1, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x8001_0000), 1, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn na4_matches_exactly_four_bytes() {
    let mut pmp = pmp();
    // [0x4000, 0x4003]
    set_entry(&mut pmp, 0, R | A_NA4, 0x1000);

    assert_eq!(
        pmp.check(PhysAddr::new(0x4000), 4, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x4003), 1, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x4004), 1, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn tor_entry_zero_starts_at_address_zero() {
    let mut pmp = pmp();
    // [0, 0x8000)
    set_entry(&mut pmp, 0, R | A_TOR, 0x2000);

    assert_eq!(
        pmp.check(PhysAddr::new(0x4000), 4, R, U).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x8000), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn tor_range_bounded_by_previous_entry() {
    let mut pmp = pmp();
    // Entry 0 stays OFF; its address is only the lower bound for entry 1.
    pmp.pmpaddr_write(0, 0x1000);
    // Entry 1: [0x4000, 0x8000)
    set_entry(&mut pmp, 1, R | A_TOR, 0x2000);

    assert_eq!(
        pmp.check(PhysAddr::new(0x5000), 4, R, U).verdict,
        PmpVerdict::Match(1)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x3000), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn tor_inverted_bounds_collapse_to_empty() {
    let mut pmp = pmp();
    pmp.pmpaddr_write(0, 0x2000);
    // Entry 1 top (0x4000) below its base (0x8000): the range is empty.
    set_entry(&mut pmp, 1, R | A_TOR, 0x1000);
    assert_eq!(pmp.num_rules(), 1);

    assert_eq!(
        pmp.check(PhysAddr::new(0x5000), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x3FFC), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn tor_neighbour_tracks_predecessor_address() {
    let mut pmp = pmp();
    // Entry 1: [0, 0x8000) while entry 0's address is still zero.
    set_entry(&mut pmp, 1, R | A_TOR, 0x2000);
    assert_eq!(
        pmp.check(PhysAddr::new(0x100), 4, R, U).verdict,
        PmpVerdict::Match(1)
    );

    // Raising entry 0's address rebases entry 1 to [0x4000, 0x8000).
    pmp.pmpaddr_write(0, 0x1000);
    assert_eq!(
        pmp.check(PhysAddr::new(0x100), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x5000), 4, R, U).verdict,
        PmpVerdict::Match(1)
    );
}

#[test]
fn entry_entering_tor_picks_up_existing_predecessor_address() {
    let mut pmp = pmp();
    // Entry 0's address changes long before entry 1 becomes a TOR rule.
    pmp.pmpaddr_write(0, 0x1000);
    pmp.pmpaddr_write(1, 0x2000);
    set_cfg_byte(&mut pmp, 1, R | A_TOR);

    assert_eq!(
        pmp.check(PhysAddr::new(0x5000), 4, R, U).verdict,
        PmpVerdict::Match(1)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x3000), 4, R, U).verdict,
        PmpVerdict::NoMatch
    );
}

#[test]
fn cfg_write_refreshes_tor_neighbour() {
    let mut pmp = pmp();
    pmp.pmpaddr_write(1, 0x2000);
    set_cfg_byte(&mut pmp, 1, R | A_TOR);

    // Re-programming entry 0 through the cfg path must leave entry 1
    // consistent with entry 0's (unchanged) address.
    let _flush: TlbFlush = pmp.pmpcfg_write(0, u64::from(R | A_TOR) | (u64::from(R | A_TOR) << 8));
    pmp.pmpaddr_write(0, 0x1000);
    assert_eq!(
        pmp.check(PhysAddr::new(0x2000), 4, R, M).verdict,
        PmpVerdict::Match(0)
    );
    assert_eq!(
        pmp.check(PhysAddr::new(0x5000), 4, R, U).verdict,
        PmpVerdict::Match(1)
    );
}
