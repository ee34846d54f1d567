//! Delta-correlation prediction table (per-instruction).
//!
//! Each tracked instruction keeps a small ring of the signed deltas between
//! its consecutive accesses. On every informative access the two most recent
//! deltas are searched for in the older part of the ring; a match means the
//! delta sequence is recurring, and the deltas that followed the match are
//! replayed from the current address to project candidate prefetches.
//!
//! Candidates already covered by the previous accepted prefetch are
//! discarded, so a steadily advancing pattern issues each block once.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_access()`: O(D) where D is the ring depth
//! - **Space Complexity:** O(C · D) for C tracked instructions

use super::Prefetcher;
use crate::config::DcptConfig;
use crate::event::AccessEvent;
use crate::gate::AdmissionGate;
use crate::history::BoundedTable;
use crate::stats::PrefetchStats;

/// Entry in the delta-correlation table.
#[derive(Clone, Debug)]
struct DeltaEntry {
    /// The last address accessed by this instruction.
    last_addr: u64,
    /// The last prefetch address the admission gate accepted for this
    /// instruction.
    last_prefetch: u64,
    /// Ring of the most recent deltas; zero slots have never been written.
    deltas: Vec<i64>,
    /// Next ring slot to overwrite (the oldest recorded delta).
    cursor: usize,
}

impl DeltaEntry {
    fn new(addr: u64, ring_deltas: usize) -> Self {
        Self {
            last_addr: addr,
            last_prefetch: 0,
            deltas: vec![0; ring_deltas],
            cursor: 0,
        }
    }

    /// Appends a delta, overwriting the oldest slot.
    fn push(&mut self, delta: i64) {
        self.deltas[self.cursor] = delta;
        self.cursor = (self.cursor + 1) % self.deltas.len();
    }

    /// Returns the ring linearized oldest-to-newest.
    fn ordered(&self) -> Vec<i64> {
        let len = self.deltas.len();
        (0..len)
            .map(|offset| self.deltas[(self.cursor + offset) % len])
            .collect()
    }
}

/// Delta-correlation predictor state.
#[derive(Debug)]
pub struct DeltaCorrelationPredictor {
    /// Profile table, keyed by instruction address.
    table: BoundedTable<DeltaEntry>,
    /// Ring depth used for newly created entries.
    ring_deltas: usize,
    stats: PrefetchStats,
}

impl DeltaCorrelationPredictor {
    /// Creates a new delta-correlation predictor.
    ///
    /// The ring depth is clamped to the smallest window the correlation can
    /// work with (two pattern deltas plus one older delta to match against).
    pub fn new(config: &DcptConfig) -> Self {
        Self {
            table: BoundedTable::new(config.table_entries),
            ring_deltas: config.ring_deltas.max(3),
            stats: PrefetchStats::new(),
        }
    }

    /// Finds the oldest recurrence of the two most recent deltas.
    ///
    /// Returns the projection start index: one past the matched position,
    /// consistent with the global-history scan.
    fn correlate(ordered: &[i64]) -> Option<usize> {
        let len = ordered.len();
        let newest_pair = (ordered[len - 2], ordered[len - 1]);
        (0..=len - 3)
            .find(|&i| (ordered[i], ordered[i + 1]) == newest_pair)
            .map(|i| i + 1)
    }
}

impl Prefetcher for DeltaCorrelationPredictor {
    fn name(&self) -> &'static str {
        "dcpt"
    }

    fn reset(&mut self) {
        self.table = BoundedTable::new(self.table.capacity());
        self.stats.reset();
    }

    fn on_access(&mut self, event: AccessEvent, gate: &mut dyn AdmissionGate) -> Vec<u64> {
        self.stats.accesses += 1;
        if event.miss {
            self.stats.misses += 1;
        }

        if !self.table.contains(event.pc) {
            if self
                .table
                .insert(event.pc, DeltaEntry::new(event.addr, self.ring_deltas))
                .is_some()
            {
                self.stats.table_evictions += 1;
            }
            return Vec::new();
        }
        let Some(entry) = self.table.get_mut(event.pc) else {
            return Vec::new();
        };

        let delta = event.addr.wrapping_sub(entry.last_addr) as i64;
        if delta == 0 {
            // Repeated access to the same block is not informative.
            return Vec::new();
        }
        entry.push(delta);
        entry.last_addr = event.addr;

        let ordered = entry.ordered();
        let Some(match_index) = Self::correlate(&ordered) else {
            return Vec::new();
        };

        // Replay the deltas that followed the matched pattern from the
        // current address.
        let mut candidates = Vec::with_capacity(ordered.len() - match_index);
        let mut addr = entry.last_addr;
        for &step in &ordered[match_index..] {
            addr = addr.wrapping_add(step as u64);
            candidates.push(addr);
        }

        // Everything up to and including the previous accepted prefetch has
        // already been requested.
        if let Some(covered) = candidates
            .iter()
            .position(|&candidate| candidate == entry.last_prefetch)
        {
            let _ = candidates.drain(..=covered);
        }

        let mut issued = Vec::new();
        for candidate in candidates {
            self.stats.candidates_proposed += 1;
            if gate.try_issue(candidate) {
                entry.last_prefetch = candidate;
                self.stats.prefetches_issued += 1;
                issued.push(candidate);
            } else {
                self.stats.prefetches_rejected += 1;
            }
        }
        issued
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
