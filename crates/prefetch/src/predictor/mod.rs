//! Prefetch predictor implementations.
//!
//! This module contains the interface and implementations for the
//! prediction strategies used to hide memory latency.

/// Per-instruction delta-correlation predictor.
pub mod dcpt;

/// Global-history-buffer delta-correlation predictor.
pub mod ghb;

/// Per-instruction stride predictor with a confidence state machine.
pub mod stride;

pub use self::dcpt::DeltaCorrelationPredictor;
pub use self::ghb::GlobalHistoryPredictor;
pub use self::stride::StridePredictor;

use crate::config::{PredictorKind, PrefetchConfig};
use crate::event::AccessEvent;
use crate::gate::AdmissionGate;
use crate::stats::PrefetchStats;

/// Trait for prefetch predictor implementations.
///
/// Predictors observe memory access patterns and propose block addresses to
/// fetch before they are demanded. Every proposal goes through the host's
/// [`AdmissionGate`]; the predictor never assumes a proposal was accepted.
///
/// Calls are strictly synchronous and single-threaded: the host delivers one
/// event at a time and the predictor observes and mutates its state
/// atomically with respect to the stream. Every operation is bounded-time.
pub trait Prefetcher: Send + Sync {
    /// Returns a short name for this predictor (e.g. `"stride"`, `"ghb"`).
    fn name(&self) -> &'static str;

    /// Discards all gathered history, keeping the configuration.
    ///
    /// Called once at simulation start and whenever the host restarts a
    /// stream.
    fn reset(&mut self);

    /// Observes one memory access and proposes prefetch candidates.
    ///
    /// Every candidate is offered to `gate`; the returned vector contains
    /// exactly the addresses the gate accepted, in proposal order. Empty on
    /// cold starts, broken patterns, and full rejection alike — absence of
    /// prediction is never an error.
    fn on_access(&mut self, event: AccessEvent, gate: &mut dyn AdmissionGate) -> Vec<u64>;

    /// Notifies the predictor that a previously requested block has arrived.
    ///
    /// Only the global history predictor reacts (it marks the block so a
    /// later hit on it is recognized as a prefetch hit); the default is a
    /// no-op.
    fn on_block_loaded(&mut self, _addr: u64, _gate: &mut dyn AdmissionGate) {}

    /// Returns the counters gathered since construction or the last
    /// [`reset`](Self::reset).
    fn stats(&self) -> &PrefetchStats;
}

/// Builds the predictor selected by `config`.
///
/// Returns `None` when prediction is disabled.
pub fn build(config: &PrefetchConfig) -> Option<Box<dyn Prefetcher + Send + Sync>> {
    match config.predictor {
        PredictorKind::None => None,
        PredictorKind::Stride => Some(Box::new(StridePredictor::new(&config.stride))),
        PredictorKind::Dcpt => Some(Box::new(DeltaCorrelationPredictor::new(&config.dcpt))),
        PredictorKind::Ghb => Some(Box::new(GlobalHistoryPredictor::new(&config.ghb))),
    }
}
