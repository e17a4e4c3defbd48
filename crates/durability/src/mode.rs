//! Durability mode configuration
//!
//! Controls when commit records are fsynced.

/// Durability mode for the commit journal
///
/// # Modes
///
/// | Mode | fsync | Data Loss Window |
/// |------|-------|-----------------|
/// | Always | Every commit | Zero |
/// | Standard | Every `batch_size` commits and on close | Up to `batch_size - 1` commits |
///
/// No background thread is involved: syncs happen inline on the committing
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityMode {
    /// fsync after every commit (slow, maximum durability)
    Always,

    /// fsync every N commits (the default)
    Standard {
        /// Maximum commits between fsyncs
        batch_size: usize,
    },
}

impl DurabilityMode {
    /// Create a standard mode with the recommended batch size of 64.
    pub fn standard_default() -> Self {
        DurabilityMode::Standard { batch_size: 64 }
    }

    /// Check if this mode requires an fsync after every commit
    pub fn requires_immediate_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Always)
    }

    /// Whether the commit that brings the unsynced count to `unsynced`
    /// must be followed by an fsync.
    pub fn should_sync(&self, unsynced: usize) -> bool {
        match self {
            DurabilityMode::Always => true,
            DurabilityMode::Standard { batch_size } => unsynced >= (*batch_size).max(1),
        }
    }

    /// Human-readable description of the mode
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::Always => "Always sync (safest, slowest)",
            DurabilityMode::Standard { .. } => "Standard (batched fsync)",
        }
    }
}

impl Default for DurabilityMode {
    fn default() -> Self {
        Self::standard_default()
    }
}
