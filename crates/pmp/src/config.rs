//! PMP unit configuration.
//!
//! Parameterizes one hart's PMP unit. It provides:
//! 1. **Defaults:** Baseline capabilities (PMP present, no ePMP, MMU host).
//! 2. **Structure:** The `PmpConfig` struct consumed by [`Pmp::new`].
//! 3. **Deserialization:** JSON loading for hosts that configure their
//!    machine model from a description file.
//!
//! [`Pmp::new`]: crate::Pmp::new

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the PMP unit.
mod defaults {
    /// PMP is implemented by default; a hart without PMP grants every access.
    pub const ENABLED: bool = true;

    /// The ePMP (Smepmp) extension is opt-in; without it `mseccfg` reads as
    /// zero and the standard permission rules apply.
    pub const EPMP: bool = false;

    /// Assume an MMU-backed host. This governs how size-zero accesses are
    /// widened before matching.
    pub const MMU: bool = true;

    /// Hart ID carried on trace events.
    pub const HART_ID: u64 = 0;
}

/// Error produced when a configuration cannot be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document was malformed or had the wrong shape.
    #[error("malformed PMP configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-hart PMP unit configuration.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvpmp_core::PmpConfig;
///
/// let config = PmpConfig::default();
/// assert!(config.enabled);
/// assert!(!config.epmp);
/// ```
///
/// Deserializing from JSON (typical machine-description usage):
///
/// ```
/// use rvpmp_core::PmpConfig;
///
/// let config = PmpConfig::from_json(r#"{ "epmp": true, "hart_id": 2 }"#).unwrap();
/// assert!(config.epmp);
/// assert_eq!(config.hart_id, 2);
/// assert!(config.mmu);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PmpConfig {
    /// Whether the hart implements PMP at all.
    #[serde(default = "PmpConfig::default_enabled")]
    pub enabled: bool,

    /// Whether the hart implements the ePMP extension (`mseccfg`).
    #[serde(default)]
    pub epmp: bool,

    /// Whether the host has an MMU. With an MMU, a size-zero access is
    /// assumed to span to the end of its page; without one it is widened to
    /// the natural word size.
    #[serde(default = "PmpConfig::default_mmu")]
    pub mmu: bool,

    /// Hart ID reported on trace events.
    #[serde(default)]
    pub hart_id: u64,
}

impl PmpConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON or
    /// does not match the configuration shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the default for the `enabled` field.
    fn default_enabled() -> bool {
        defaults::ENABLED
    }

    /// Returns the default for the `mmu` field.
    fn default_mmu() -> bool {
        defaults::MMU
    }
}

impl Default for PmpConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::ENABLED,
            epmp: defaults::EPMP,
            mmu: defaults::MMU,
            hart_id: defaults::HART_ID,
        }
    }
}
