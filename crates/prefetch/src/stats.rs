//! Prediction statistics collection and reporting.
//!
//! This module tracks the behaviour of a predictor over a replayed access
//! stream. It provides:
//! 1. **Stream counters:** observed accesses and demand misses.
//! 2. **Proposal outcome:** candidates proposed, accepted, and rejected by
//!    the admission gate.
//! 3. **History pressure:** profile-table evictions and miss records
//!    written.

/// Counters describing one predictor's behaviour over an access stream.
///
/// All counters are plain totals; derived ratios are computed on demand with
/// divide-by-zero protection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Access events observed.
    pub accesses: u64,
    /// Access events that were demand misses.
    pub misses: u64,
    /// Candidate addresses proposed to the admission gate.
    pub candidates_proposed: u64,
    /// Candidates the gate accepted.
    pub prefetches_issued: u64,
    /// Candidates the gate rejected.
    pub prefetches_rejected: u64,
    /// Profile-table entries evicted to make room for new instructions.
    pub table_evictions: u64,
    /// Records written into the global miss history.
    pub history_records: u64,
}

impl PrefetchStats {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of proposed candidates the gate accepted, as a percentage.
    pub fn issue_rate(&self) -> f64 {
        let proposed = if self.candidates_proposed == 0 {
            1
        } else {
            self.candidates_proposed
        };
        (self.prefetches_issued as f64 / proposed as f64) * 100.0
    }

    /// Fraction of observed accesses that were demand misses, as a
    /// percentage.
    pub fn miss_rate(&self) -> f64 {
        let accesses = if self.accesses == 0 { 1 } else { self.accesses };
        (self.misses as f64 / accesses as f64) * 100.0
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PREFETCH PREDICTOR STATISTICS");
        println!("==========================================================");
        println!("stream.accesses          {}", self.accesses);
        println!(
            "stream.misses            {} ({:.2}%)",
            self.misses,
            self.miss_rate()
        );
        println!("----------------------------------------------------------");
        println!("pf.proposed              {}", self.candidates_proposed);
        println!("pf.issued                {}", self.prefetches_issued);
        println!("pf.rejected              {}", self.prefetches_rejected);
        println!("pf.issue_rate            {:.2}%", self.issue_rate());
        println!("----------------------------------------------------------");
        println!("history.evictions        {}", self.table_evictions);
        println!("history.records          {}", self.history_records);
        println!("==========================================================");
    }
}
