//! Admission gate trait for host-side prefetch control.
//!
//! This module defines the `AdmissionGate` trait implemented by the host
//! memory subsystem. It provides:
//! 1. **Admission:** `try_issue`, the single authority on whether a proposed
//!    prefetch becomes a real memory request.
//! 2. **Cache state:** residency and prefetched-marker queries used by the
//!    history-based predictors.
//! 3. **Marker maintenance:** setting and consuming the per-block prefetched
//!    marker as prefetched blocks arrive and are first used.
//!
//! The predictors never decide on their own that a request is legal: address
//! range checks, outstanding-queue capacity, residency, and MSHR occupancy
//! all live behind `try_issue`.

/// Trait for the host-side admission gate consumed by every predictor.
///
/// Implementors own the cache model, the in-flight request queue, and the
/// per-block prefetched markers. All implementors must be `Send + Sync` so a
/// predictor/gate pair can move across threads with the rest of a simulation.
pub trait AdmissionGate: Send + Sync {
    /// Attempts to issue a prefetch for `addr`.
    ///
    /// Returns `true` only if the host actually accepted the request. The
    /// caller must not assume acceptance; a rejected candidate is simply
    /// dropped.
    fn try_issue(&mut self, addr: u64) -> bool;

    /// Returns `true` if the block containing `addr` is resident in the
    /// cache.
    fn in_cache(&self, addr: u64) -> bool;

    /// Returns `true` if the block containing `addr` was brought in by a
    /// prefetch and has not been demand-used since.
    fn was_prefetched(&self, addr: u64) -> bool;

    /// Consumes the prefetched marker for `addr` (first demand use of a
    /// prefetched block).
    fn clear_prefetched(&mut self, addr: u64);

    /// Sets the prefetched marker for `addr` (a prefetch request completed
    /// and the block arrived).
    fn mark_prefetched(&mut self, addr: u64);
}
