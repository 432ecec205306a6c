//! Host page geometry.
//!
//! The matcher and the TLB hinter both reason about the 4 KiB host page: a
//! size-zero access is widened to the end of its page, and a translation may
//! only be cached page-wide when no PMP region splits the page.

/// Host page size in bytes (4 KiB).
pub const PAGE_SIZE: u64 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u64 = 12;

/// Mask selecting the byte offset within a page.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// Mask selecting the page-aligned part of an address.
pub const PAGE_MASK: u64 = !PAGE_OFFSET_MASK;

/// Fallback span for size-zero accesses when the host has no MMU.
pub const WORD_SIZE: u64 = 8;
