//! Hardware prefetch prediction library.
//!
//! This crate predicts future memory-block accesses from an observed stream
//! of load events so a host memory subsystem can fetch data before it is
//! demanded. It implements the following:
//! 1. **Predictors:** per-instruction stride (reference prediction table),
//!    per-instruction delta correlation, and a shared global history buffer
//!    with per-instruction chains.
//! 2. **History:** bounded FIFO profile tables and the circular miss-history
//!    ring the predictors are built on.
//! 3. **Interfaces:** the access event input and the host admission gate the
//!    predictors propose candidates through.
//! 4. **Simulation:** configuration, trace replay, and statistics
//!    collection.
//!
//! The library only proposes candidate addresses; whether a prefetch is
//! actually issued is the host's decision, behind
//! [`AdmissionGate::try_issue`].

/// Predictor configuration (defaults, enums, per-strategy structures).
pub mod config;
/// Observed memory access events.
pub mod event;
/// Host-side admission gate and cache-state contract.
pub mod gate;
/// Bounded history structures (profile table, miss-history ring).
pub mod history;
/// Prediction strategies and the predictor trait.
pub mod predictor;
/// Trace replay driver.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `PrefetchConfig::default()` or deserialize
/// from JSON.
pub use crate::config::PrefetchConfig;
/// The per-access input record.
pub use crate::event::AccessEvent;
/// The host collaborator contract.
pub use crate::gate::AdmissionGate;
/// The predictor interface; build instances with [`predictor::build`].
pub use crate::predictor::Prefetcher;
