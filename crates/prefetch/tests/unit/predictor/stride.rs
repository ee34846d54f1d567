//! Stride Predictor Tests.
//!
//! Verifies the reference-prediction-table confidence machine: promotion on
//! confirming misses and hits, demotion on mispredictions, prediction
//! suppression in the no-prediction state, and the FIFO bound on tracked
//! instructions.

use prefetch_core::config::StrideConfig;
use prefetch_core::event::AccessEvent;
use prefetch_core::predictor::stride::StridePredictor;
use prefetch_core::predictor::Prefetcher;
use pretty_assertions::assert_eq;

use crate::common::mocks::MockGate;

const P1: u64 = 0x4000_1000;

fn predictor_with_capacity(table_entries: usize) -> StridePredictor {
    StridePredictor::new(&StrideConfig { table_entries })
}

// ══════════════════════════════════════════════════════════
// 1. Cold start
// ══════════════════════════════════════════════════════════

/// The first sighting of an instruction creates its profile and never
/// predicts.
#[test]
fn first_access_never_predicts() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let issued = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    assert!(issued.is_empty());
    assert!(gate.issued.is_empty());
}

// ══════════════════════════════════════════════════════════
// 2. Constant stride scenario
// ══════════════════════════════════════════════════════════

/// A miss stream at constant stride 4 confirms the stride and keeps
/// predicting one stride ahead: by the fourth access the profile is steady
/// and the predictor asks for block 116.
#[test]
fn constant_stride_reaches_steady_and_predicts_ahead() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 104), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 108), &mut gate);
    let issued = pf.on_access(AccessEvent::miss(P1, 112), &mut gate);

    assert_eq!(issued, vec![116]);
    assert_eq!(gate.issued, vec![108, 112, 116]);
}

// ══════════════════════════════════════════════════════════
// 3. Confidence machine transitions
// ══════════════════════════════════════════════════════════

/// Two stride changes in a row silence the predictor; a confirming miss
/// wakes it back up.
#[test]
fn repeated_stride_change_suppresses_then_recovers() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    // First delta (10): transient, predicts 120.
    assert_eq!(pf.on_access(AccessEvent::miss(P1, 110), &mut gate), vec![
        120
    ]);
    // Second delta (5) disagrees: no-prediction, silent.
    assert!(
        pf.on_access(AccessEvent::miss(P1, 115), &mut gate)
            .is_empty()
    );
    // Delta 5 confirms the recorded stride: transient again, predicts 125.
    assert_eq!(pf.on_access(AccessEvent::miss(P1, 120), &mut gate), vec![
        125
    ]);
}

/// A single mispredicted miss demotes a steady profile but keeps its stride,
/// so the very next access is still predicted with the old stride.
#[test]
fn steady_mispredict_keeps_stride() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 104), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 108), &mut gate); // steady

    // Jump breaks the pattern; the profile is demoted but the stride (4)
    // survives and keeps being applied.
    assert_eq!(pf.on_access(AccessEvent::miss(P1, 200), &mut gate), vec![
        204
    ]);
    // The old stride confirms from the new base.
    assert_eq!(pf.on_access(AccessEvent::miss(P1, 204), &mut gate), vec![
        208
    ]);
}

/// Hits promote towards steady without touching the recorded stride.
#[test]
fn hit_promotes_and_predicts_with_recorded_stride() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 110), &mut gate); // stride 10
    let issued = pf.on_access(AccessEvent::hit(P1, 115), &mut gate);

    assert_eq!(issued, vec![125]);
}

/// A hit pulls a silenced profile back to transient.
#[test]
fn hit_recovers_from_no_prediction() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 110), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 115), &mut gate); // silenced

    // Hit: transient again, predicting with the last recorded stride (5).
    assert_eq!(pf.on_access(AccessEvent::hit(P1, 120), &mut gate), vec![
        125
    ]);
}

// ══════════════════════════════════════════════════════════
// 4. Determinism
// ══════════════════════════════════════════════════════════

/// The same event sequence replayed on a fresh predictor produces the same
/// issue stream and the same counters.
#[test]
fn identical_streams_produce_identical_trajectories() {
    let trace = [
        AccessEvent::miss(P1, 100),
        AccessEvent::miss(P1, 110),
        AccessEvent::hit(P1, 115),
        AccessEvent::miss(P1, 125),
        AccessEvent::miss(P1, 130),
        AccessEvent::hit(P1, 140),
    ];

    let mut first = predictor_with_capacity(256);
    let mut first_gate = MockGate::new();
    let mut second = predictor_with_capacity(256);
    let mut second_gate = MockGate::new();

    for event in trace {
        let _ = first.on_access(event, &mut first_gate);
        let _ = second.on_access(event, &mut second_gate);
    }

    assert_eq!(first_gate.issued, second_gate.issued);
    assert_eq!(first.stats(), second.stats());
}

// ══════════════════════════════════════════════════════════
// 5. Capacity bound and gate rejection
// ══════════════════════════════════════════════════════════

/// With a full table a new instruction evicts the oldest profile, which then
/// restarts cold.
#[test]
fn eviction_drops_oldest_profile() {
    let mut pf = predictor_with_capacity(2);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(0x10, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(0x20, 200), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(0x30, 300), &mut gate); // evicts 0x10

    // 0x10 lost its profile: this is a first sighting again.
    let issued = pf.on_access(AccessEvent::miss(0x10, 104), &mut gate);
    assert!(issued.is_empty());
    assert_eq!(pf.stats().table_evictions, 2);
}

/// A rejected candidate is dropped silently and counted.
#[test]
fn rejected_prediction_is_counted_not_returned() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::rejecting();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let issued = pf.on_access(AccessEvent::miss(P1, 104), &mut gate);

    assert!(issued.is_empty());
    assert!(gate.issued.is_empty());
    assert_eq!(pf.stats().candidates_proposed, 1);
    assert_eq!(pf.stats().prefetches_rejected, 1);
    assert_eq!(pf.stats().prefetches_issued, 0);
}

/// A candidate already resident in the cache is refused by the gate like
/// any other rejection; the predictor carries no residency logic of its
/// own.
#[test]
fn resident_block_is_not_reissued() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();
    gate.make_resident(116);

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 104), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 108), &mut gate);
    let issued = pf.on_access(AccessEvent::miss(P1, 112), &mut gate);

    assert!(issued.is_empty());
    assert_eq!(gate.issued, vec![108, 112]);
}

/// Reset drops every profile but keeps the configured capacity.
#[test]
fn reset_clears_history() {
    let mut pf = predictor_with_capacity(256);
    let mut gate = MockGate::new();

    let _ = pf.on_access(AccessEvent::miss(P1, 100), &mut gate);
    let _ = pf.on_access(AccessEvent::miss(P1, 104), &mut gate);
    pf.reset();

    assert_eq!(pf.stats().accesses, 0);
    // Cold again: no prediction on the first access after reset.
    assert!(
        pf.on_access(AccessEvent::miss(P1, 108), &mut gate)
            .is_empty()
    );
}
