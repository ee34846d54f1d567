//! Miss History Ring Tests.
//!
//! Verifies slot allocation order, wrap-around overwrite, and the lazy
//! staleness check that protects backward chain walks after a slot has been
//! reused by another instruction.

use prefetch_core::history::{MissHistory, MissRecord};

fn record(pc: u64, addr: u64, prev: Option<usize>) -> MissRecord {
    MissRecord { pc, addr, prev }
}

// ══════════════════════════════════════════════════════════
// 1. Slot allocation
// ══════════════════════════════════════════════════════════

/// Records land in consecutive slots starting at zero.
#[test]
fn push_allocates_slots_in_order() {
    let mut ring = MissHistory::new(4);
    assert_eq!(ring.push(record(1, 0x100, None)), 0);
    assert_eq!(ring.push(record(1, 0x140, Some(0))), 1);
    assert_eq!(ring.push(record(2, 0x800, None)), 2);
}

/// Unwritten slots and out-of-range indices read back as absent.
#[test]
fn empty_slots_read_as_none() {
    let mut ring = MissHistory::new(2);
    assert!(ring.get(0).is_none());
    assert!(ring.get(7).is_none());

    let slot = ring.push(record(1, 0x100, None));
    assert_eq!(ring.get(slot).map(|r| r.addr), Some(0x100));
}

// ══════════════════════════════════════════════════════════
// 2. Wrap-around
// ══════════════════════════════════════════════════════════

/// When the ring is full the oldest slot is overwritten unconditionally.
#[test]
fn wrap_overwrites_oldest_slot() {
    let mut ring = MissHistory::new(2);
    assert_eq!(ring.push(record(1, 0x100, None)), 0);
    assert_eq!(ring.push(record(2, 0x200, None)), 1);

    // Third insertion wraps back onto slot 0.
    assert_eq!(ring.push(record(3, 0x300, None)), 0);
    assert_eq!(ring.get(0).map(|r| r.pc), Some(3));
    assert_eq!(ring.get(1).map(|r| r.pc), Some(2));
}

// ══════════════════════════════════════════════════════════
// 3. Staleness check
// ══════════════════════════════════════════════════════════

/// `lookup` only returns a record still owned by the expected instruction.
#[test]
fn lookup_rejects_foreign_records() {
    let mut ring = MissHistory::new(2);
    let slot = ring.push(record(1, 0x100, None));

    assert!(ring.lookup(slot, 1).is_some());
    assert!(ring.lookup(slot, 2).is_none());
}

/// After wrap-around an old index resolves to another instruction's record
/// and the staleness check refuses it.
#[test]
fn lookup_detects_overwritten_slot() {
    let mut ring = MissHistory::new(2);
    let old_slot = ring.push(record(1, 0x100, None));
    let _ = ring.push(record(2, 0x200, None));
    let _ = ring.push(record(3, 0x300, None)); // reuses slot 0

    assert!(ring.lookup(old_slot, 1).is_none());
    assert!(ring.lookup(old_slot, 3).is_some());
}
