//! Bounded history structures shared by the predictors.
//!
//! Two storage primitives back every prediction strategy in this crate:
//!
//! - [`BoundedTable`]: a fixed-capacity per-instruction profile table with
//!   FIFO insertion-order eviction.
//! - [`MissHistory`]: a fixed-capacity circular buffer of miss records,
//!   linked per instruction through backward slot indices.
//!
//! Both are arena-style: plain `Vec` storage, indices instead of pointers,
//! and explicit staleness checks where an index can outlive the record it
//! referred to.

/// Circular miss-history buffer with per-instruction backward links.
pub mod ring;

/// Fixed-capacity table with FIFO insertion-order eviction.
pub mod table;

pub use ring::{MissHistory, MissRecord};
pub use table::BoundedTable;
