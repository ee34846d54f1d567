//! Global history buffer predictor (per-instruction delta correlation).
//!
//! All instructions share one circular buffer of miss records; the records
//! belonging to one instruction are chained through backward slot indices,
//! with an index table mapping each instruction to its most recent record.
//! On every access the chain for the triggering instruction is walked
//! backward to rebuild its recent delta history, and the same two-most-recent
//! delta correlation as the per-instruction variant is applied to the
//! rebuilt window.
//!
//! Sharing the buffer means hot instructions keep long chains while cold
//! ones age out for free, at the price of stale links: the ring overwrites
//! the oldest slot unconditionally, so every link is validated against the
//! instruction address it is expected to carry before it is followed.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_access()`: O(L) where L is the lookback depth
//! - **Space Complexity:** O(N + M) for the ring and the index table

use tracing::trace;

use super::Prefetcher;
use crate::config::{GhbConfig, MatchScan};
use crate::event::AccessEvent;
use crate::gate::AdmissionGate;
use crate::history::{BoundedTable, MissHistory, MissRecord};
use crate::stats::PrefetchStats;

/// Global history predictor state.
#[derive(Debug)]
pub struct GlobalHistoryPredictor {
    /// Shared circular buffer of miss records.
    history: MissHistory,
    /// Most recent ring slot per instruction, FIFO-bounded independently of
    /// the ring's own overwrite policy.
    index: BoundedTable<usize>,
    /// Deltas gathered per prediction attempt.
    lookback: usize,
    /// Maximum candidates projected per correlation match.
    degree: usize,
    /// Correlation scan mode.
    scan: MatchScan,
    stats: PrefetchStats,
}

impl GlobalHistoryPredictor {
    /// Creates a new global history predictor.
    ///
    /// The lookback window is clamped to the smallest width the correlation
    /// can work with, and the degree to at least one candidate.
    pub fn new(config: &GhbConfig) -> Self {
        Self {
            history: MissHistory::new(config.buffer_entries),
            index: BoundedTable::new(config.index_entries),
            lookback: config.lookback.max(3),
            degree: config.degree.max(1),
            scan: config.match_scan,
            stats: PrefetchStats::new(),
        }
    }

    /// Records a miss (or prefetch hit) for `pc`, linking it to the
    /// instruction's previous record.
    fn record(&mut self, pc: u64, addr: u64) {
        let prev = self.index.get(pc).copied();
        let slot = self.history.push(MissRecord { pc, addr, prev });
        self.stats.history_records += 1;
        if self.index.insert(pc, slot).is_some() {
            self.stats.table_evictions += 1;
        }
    }

    /// Walks the backward chain for `pc` and rebuilds its delta window.
    ///
    /// The newest delta lands at index `lookback - 1`; if the chain breaks
    /// early the leading slots stay zero. Returns the window together with
    /// the most recent miss address, or `None` when the head record itself
    /// is stale.
    fn gather_deltas(&self, pc: u64, head_slot: usize) -> Option<(Vec<i64>, u64)> {
        let head = self.history.lookup(head_slot, pc)?;

        let mut deltas = vec![0_i64; self.lookback];
        let mut current_slot = head_slot;
        let mut current = *head;
        for slot in (0..self.lookback).rev() {
            let Some(link_slot) = current.prev else {
                break;
            };
            // An exhausted chain links a record to its own slot.
            if link_slot == current_slot {
                break;
            }
            let Some(linked) = self.history.lookup(link_slot, pc) else {
                trace!(pc, slot = link_slot, "stale chain link, stopping walk");
                break;
            };
            deltas[slot] = current.addr.wrapping_sub(linked.addr) as i64;
            current_slot = link_slot;
            current = *linked;
        }
        Some((deltas, head.addr))
    }

    /// Scans the delta window for a recurrence of its two newest deltas.
    ///
    /// First match wins; returns the projection start index (one past the
    /// matched position).
    fn correlate(&self, deltas: &[i64]) -> Option<usize> {
        let len = deltas.len();
        let newest_pair = (deltas[len - 2], deltas[len - 1]);
        let step = match self.scan {
            MatchScan::Even => 2,
            MatchScan::Sequential => 1,
        };
        (0..=len - 3)
            .step_by(step)
            .find(|&i| (deltas[i], deltas[i + 1]) == newest_pair)
            .map(|i| i + 1)
    }
}

impl Prefetcher for GlobalHistoryPredictor {
    fn name(&self) -> &'static str {
        "ghb"
    }

    fn reset(&mut self) {
        self.history = MissHistory::new(self.history.capacity());
        self.index = BoundedTable::new(self.index.capacity());
        self.stats.reset();
    }

    fn on_access(&mut self, event: AccessEvent, gate: &mut dyn AdmissionGate) -> Vec<u64> {
        self.stats.accesses += 1;
        if event.miss {
            self.stats.misses += 1;
        }

        // Demand misses always enter the history; a hit enters only when it
        // consumes a block a prefetch brought in.
        let prefetch_hit = !event.miss && gate.was_prefetched(event.addr);
        if prefetch_hit {
            gate.clear_prefetched(event.addr);
        }
        if event.miss || prefetch_hit {
            self.record(event.pc, event.addr);
        }

        let Some(head_slot) = self.index.get(event.pc).copied() else {
            return Vec::new();
        };
        let Some((deltas, recent_addr)) = self.gather_deltas(event.pc, head_slot) else {
            return Vec::new();
        };
        let Some(match_index) = self.correlate(&deltas) else {
            return Vec::new();
        };

        // Replay the deltas that followed the matched pattern from the most
        // recent miss address. A zero delta means the chain never reached
        // that depth, so projection stops there.
        let mut issued = Vec::new();
        let mut candidate = recent_addr;
        for offset in 0..self.degree {
            let Some(&step) = deltas.get(match_index + offset) else {
                break;
            };
            if step == 0 {
                break;
            }
            candidate = candidate.wrapping_add(step as u64);
            if candidate == recent_addr {
                continue;
            }
            self.stats.candidates_proposed += 1;
            if gate.try_issue(candidate) {
                self.stats.prefetches_issued += 1;
                issued.push(candidate);
            } else {
                self.stats.prefetches_rejected += 1;
            }
        }
        issued
    }

    fn on_block_loaded(&mut self, addr: u64, gate: &mut dyn AdmissionGate) {
        gate.mark_prefetched(addr);
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
