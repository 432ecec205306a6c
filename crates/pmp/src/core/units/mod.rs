//! Enforcement units.
//!
//! A single unit lives here: the PMP rule table with its CSR gateway,
//! matcher, and TLB hinter. Each hart of a multi-hart machine instantiates
//! its own copy; no state is shared between harts.

/// Physical Memory Protection unit.
pub mod pmp;
