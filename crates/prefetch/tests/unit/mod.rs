//! # Unit Components
//!
//! This module serves as the central hub for the library's unit tests. It
//! organizes the fundamental building blocks under test: history
//! structures, predictors, configuration, and the replay driver.


/// Unit tests for the bounded history structures.
///
/// Covers the FIFO profile table and the circular miss-history ring,
/// including the staleness rules around slot reuse.
pub mod history;
