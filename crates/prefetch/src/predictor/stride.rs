//! Stride predictor (reference prediction table).
//!
//! Tracks, per load instruction, the last address it touched and the stride
//! between its two most recent accesses. A four-state confidence machine
//! decides when the stride is stable enough to prefetch ahead of the
//! instruction. The profile table is capacity-bound with FIFO eviction, so a
//! long-running stream cannot grow state without bound.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_access()`: O(1)
//! - **Space Complexity:** O(C) where C is the table capacity
//! - **Best Case:** regular strided patterns (array traversals, matrix
//!   operations)
//! - **Worst Case:** irregular access patterns (linked lists, hash tables)

use super::Prefetcher;
use crate::config::StrideConfig;
use crate::event::AccessEvent;
use crate::gate::AdmissionGate;
use crate::history::BoundedTable;
use crate::stats::PrefetchStats;

/// Confidence state of a stride profile.
///
/// The machine demotes on mispredicted misses and promotes on hits and on
/// misses that confirm the recorded stride. Predictions are suppressed only
/// in [`NoPrediction`](Self::NoPrediction).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confidence {
    /// Freshly created or recently demoted profile.
    Initial,
    /// One confirmation away from steady.
    Transient,
    /// Stride confirmed repeatedly.
    Steady,
    /// Stride has been wrong twice in a row; hold predictions.
    NoPrediction,
}

/// Entry in the reference prediction table.
#[derive(Clone, Copy, Debug)]
struct StrideEntry {
    /// The last address accessed by this instruction.
    last_addr: u64,
    /// The stride recorded between consecutive accesses.
    stride: i64,
    /// Confidence in the recorded stride.
    confidence: Confidence,
}

impl StrideEntry {
    fn new(addr: u64) -> Self {
        Self {
            last_addr: addr,
            stride: 0,
            confidence: Confidence::Initial,
        }
    }
}

/// Stride predictor state.
#[derive(Debug)]
pub struct StridePredictor {
    /// Reference prediction table, keyed by instruction address.
    table: BoundedTable<StrideEntry>,
    stats: PrefetchStats,
}

impl StridePredictor {
    /// Creates a new stride predictor.
    pub fn new(config: &StrideConfig) -> Self {
        Self {
            table: BoundedTable::new(config.table_entries),
            stats: PrefetchStats::new(),
        }
    }
}

impl Prefetcher for StridePredictor {
    fn name(&self) -> &'static str {
        "stride"
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
                .insert(event.pc, StrideEntry::new(event.addr))
                .is_some()
            {
                self.stats.table_evictions += 1;
            }
            return Vec::new();
        }
        let Some(entry) = self.table.get_mut(event.pc) else {
            return Vec::new();
        };

        // Delta against the address recorded at the previous call for this
        // instruction.
        let delta = event.addr.wrapping_sub(entry.last_addr) as i64;

        if event.miss {
            if delta == entry.stride {
                entry.confidence = match entry.confidence {
                    Confidence::Initial => {
                        entry.stride = delta;
                        Confidence::Transient
                    }
                    Confidence::Transient | Confidence::Steady => Confidence::Steady,
                    Confidence::NoPrediction => {
                        entry.stride = delta;
                        Confidence::Transient
                    }
                };
            } else {
                entry.confidence = match entry.confidence {
                    Confidence::Initial => {
                        entry.stride = delta;
                        Confidence::Transient
                    }
                    Confidence::Transient => {
                        entry.stride = delta;
                        Confidence::NoPrediction
                    }
                    // A single mispredicted miss discards steady confidence
                    // but keeps the stride.
                    Confidence::Steady => Confidence::Initial,
                    Confidence::NoPrediction => {
                        entry.stride = delta;
                        Confidence::NoPrediction
                    }
                };
            }
        } else {
            entry.confidence = match entry.confidence {
                Confidence::Initial | Confidence::Transient | Confidence::Steady => {
                    Confidence::Steady
                }
                Confidence::NoPrediction => Confidence::Transient,
            };
        }

        entry.last_addr = event.addr;

        if entry.confidence == Confidence::NoPrediction {
            return Vec::new();
        }

        let candidate = event.addr.wrapping_add(entry.stride as u64);
        self.stats.candidates_proposed += 1;
        if gate.try_issue(candidate) {
            self.stats.prefetches_issued += 1;
            vec![candidate]
        } else {
            self.stats.prefetches_rejected += 1;
            Vec::new()
        }
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
