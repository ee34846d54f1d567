//! Trace replay: drives a predictor over a recorded access stream.
//!
//! The replay owns the predictor and the host gate side by side, so the two
//! halves of every call are borrowed independently and the host keeps a
//! plain handle to both.

use tracing::trace;

use crate::event::AccessEvent;
use crate::gate::AdmissionGate;
use crate::predictor::Prefetcher;

/// Top-level replay driver: predictor and admission gate side by side.
pub struct TraceReplay<G> {
    /// Active prediction strategy.
    pub predictor: Box<dyn Prefetcher + Send + Sync>,
    /// Host-side admission gate and cache-state model.
    pub gate: G,
}

impl<G: AdmissionGate> TraceReplay<G> {
    /// Creates a replay around an existing predictor and gate.
    pub fn new(predictor: Box<dyn Prefetcher + Send + Sync>, gate: G) -> Self {
        Self { predictor, gate }
    }

    /// Delivers one access event; returns the prefetches the gate accepted.
    pub fn step(&mut self, event: AccessEvent) -> Vec<u64> {
        let issued = self.predictor.on_access(event, &mut self.gate);
        if !issued.is_empty() {
            trace!(
                pc = event.pc,
                addr = event.addr,
                count = issued.len(),
                "prefetches issued"
            );
        }
        issued
    }

    /// Delivers a block-load completion notification.
    pub fn complete(&mut self, addr: u64) {
        self.predictor.on_block_loaded(addr, &mut self.gate);
    }

    /// Replays a whole event stream; returns the total number of accepted
    /// prefetches.
    pub fn run(&mut self, events: &[AccessEvent]) -> u64 {
        events
            .iter()
            .map(|event| self.step(*event).len() as u64)
            .sum()
    }
}

impl<G> std::fmt::Debug for TraceReplay<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceReplay")
            .field("predictor", &self.predictor.name())
            .finish_non_exhaustive()
    }
}
