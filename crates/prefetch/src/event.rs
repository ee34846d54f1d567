//! Observed memory access events.
//!
//! The host memory subsystem produces one [`AccessEvent`] per load it
//! observes and hands it to the active predictor synchronously. Addresses are
//! raw physical block addresses; all delta arithmetic downstream is signed
//! and wrapping, matching the register-width semantics of the modelled
//! hardware.

/// A single observed memory access.
///
/// Immutable input record: produced once by the host, consumed by whichever
/// predictor is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessEvent {
    /// Address of the load instruction that performed the access.
    pub pc: u64,
    /// Physical block address that was accessed.
    pub addr: u64,
    /// Whether the access missed in the cache.
    pub miss: bool,
}

impl AccessEvent {
    /// Creates a new access event.
    #[inline]
    pub fn new(pc: u64, addr: u64, miss: bool) -> Self {
        Self { pc, addr, miss }
    }

    /// Convenience constructor for a demand miss.
    #[inline]
    pub fn miss(pc: u64, addr: u64) -> Self {
        Self::new(pc, addr, true)
    }

    /// Convenience constructor for a cache hit.
    #[inline]
    pub fn hit(pc: u64, addr: u64) -> Self {
        Self::new(pc, addr, false)
    }
}
