//! Configuration system for the prefetch predictors.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the library. It provides:
//! 1. **Defaults:** baseline hardware constants (table capacities, ring
//!    depths, lookback and prefetch degree).
//! 2. **Structures:** per-predictor configuration grouped under one root.
//! 3. **Enums:** predictor selection and the correlation scan mode.
//!
//! Configuration is supplied as JSON via [`PrefetchConfig::from_json`] or
//! built in code with `PrefetchConfig::default()`. Capacities are fixed at
//! construction time; there are no runtime flags.

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the predictors.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden.
mod defaults {
    /// Stride predictor reference-prediction-table capacity (256 entries).
    pub const STRIDE_TABLE_ENTRIES: usize = 256;

    /// Delta-correlation predictor table capacity (512 entries).
    pub const DCPT_TABLE_ENTRIES: usize = 512;

    /// Per-instruction delta ring depth for the delta-correlation predictor.
    pub const DCPT_RING_DELTAS: usize = 8;

    /// Global history buffer capacity (1024 records).
    ///
    /// Useful configurations range from 256 to 32768 records depending on
    /// the modelled hardware budget.
    pub const GHB_BUFFER_ENTRIES: usize = 1024;

    /// Global history index-table capacity (256 instructions).
    pub const GHB_INDEX_ENTRIES: usize = 256;

    /// Backward chain-walk depth for the global history predictor.
    pub const GHB_LOOKBACK: usize = 12;

    /// Prefetch degree: candidates projected per correlation match.
    pub const GHB_DEGREE: usize = 4;
}

/// Prediction strategy selection.
///
/// Exactly one strategy consumes the event stream at a time; all three see
/// the same `AccessEvent` input and talk to the same admission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// No prediction; every access is observed and dropped.
    #[default]
    None,
    /// Per-instruction stride predictor with a confidence state machine.
    Stride,
    /// Per-instruction delta-correlation predictor.
    #[serde(alias = "DCPT")]
    Dcpt,
    /// Global-history-buffer delta-correlation predictor.
    #[serde(alias = "GHB")]
    Ghb,
}

/// Scan mode for the correlation match over the gathered delta window.
///
/// The original hardware proposal scans even-aligned window positions; the
/// sequential mode checks every position and finds odd-aligned recurrences
/// at the cost of twice the comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MatchScan {
    /// Compare even-aligned window positions only.
    #[default]
    Even,
    /// Compare every window position.
    Sequential,
}

/// Root configuration for the prediction library.
///
/// # Examples
///
/// Deserializing from JSON, with every omitted field taking its default:
///
/// ```
/// use prefetch_core::config::{MatchScan, PredictorKind, PrefetchConfig};
///
/// let json = r#"{
///     "predictor": "Ghb",
///     "ghb": {
///         "buffer_entries": 4096,
///         "lookback": 8,
///         "match_scan": "Sequential"
///     }
/// }"#;
///
/// let config = PrefetchConfig::from_json(json).unwrap();
/// assert_eq!(config.predictor, PredictorKind::Ghb);
/// assert_eq!(config.ghb.buffer_entries, 4096);
/// assert_eq!(config.ghb.index_entries, 256);
/// assert_eq!(config.ghb.match_scan, MatchScan::Sequential);
/// assert_eq!(config.stride.table_entries, 256);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PrefetchConfig {
    /// Active prediction strategy.
    #[serde(default)]
    pub predictor: PredictorKind,

    /// Stride predictor parameters.
    #[serde(default)]
    pub stride: StrideConfig,

    /// Delta-correlation predictor parameters.
    #[serde(default)]
    pub dcpt: DcptConfig,

    /// Global history predictor parameters.
    #[serde(default)]
    pub ghb: GhbConfig,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorKind::default(),
            stride: StrideConfig::default(),
            dcpt: DcptConfig::default(),
            ghb: GhbConfig::default(),
        }
    }
}

impl PrefetchConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors of [`validate`](Self::validate) for degenerate parameters.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every capacity and window parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooSmall`] naming the first offending field.
    /// The predictor constructors additionally clamp degenerate values, so
    /// skipping validation can never cause a panic — only a silently
    /// adjusted configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, usize, usize); 7] = [
            ("stride.table_entries", self.stride.table_entries, 1),
            ("dcpt.table_entries", self.dcpt.table_entries, 1),
            ("dcpt.ring_deltas", self.dcpt.ring_deltas, 3),
            ("ghb.buffer_entries", self.ghb.buffer_entries, 1),
            ("ghb.index_entries", self.ghb.index_entries, 1),
            ("ghb.lookback", self.ghb.lookback, 3),
            ("ghb.degree", self.ghb.degree, 1),
        ];
        for (field, got, min) in checks {
            if got < min {
                return Err(ConfigError::TooSmall { field, min, got });
            }
        }
        Ok(())
    }
}

/// Stride predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StrideConfig {
    /// Reference-prediction-table capacity (distinct instructions tracked).
    #[serde(default = "StrideConfig::default_table_entries")]
    pub table_entries: usize,
}

impl StrideConfig {
    /// Returns the default reference-prediction-table capacity.
    fn default_table_entries() -> usize {
        defaults::STRIDE_TABLE_ENTRIES
    }
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            table_entries: defaults::STRIDE_TABLE_ENTRIES,
        }
    }
}

/// Delta-correlation predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DcptConfig {
    /// Profile-table capacity (distinct instructions tracked).
    #[serde(default = "DcptConfig::default_table_entries")]
    pub table_entries: usize,

    /// Per-instruction delta ring depth.
    ///
    /// The correlation needs at least three deltas: the two most recent form
    /// the search pattern and at least one older delta must exist to match
    /// against.
    #[serde(default = "DcptConfig::default_ring_deltas")]
    pub ring_deltas: usize,
}

impl DcptConfig {
    /// Returns the default profile-table capacity.
    fn default_table_entries() -> usize {
        defaults::DCPT_TABLE_ENTRIES
    }

    /// Returns the default delta ring depth.
    fn default_ring_deltas() -> usize {
        defaults::DCPT_RING_DELTAS
    }
}

impl Default for DcptConfig {
    fn default() -> Self {
        Self {
            table_entries: defaults::DCPT_TABLE_ENTRIES,
            ring_deltas: defaults::DCPT_RING_DELTAS,
        }
    }
}

/// Global history predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GhbConfig {
    /// Circular miss-history capacity in records.
    #[serde(default = "GhbConfig::default_buffer_entries")]
    pub buffer_entries: usize,

    /// Index-table capacity (distinct instructions tracked), independent of
    /// the ring's own overwrite pressure.
    #[serde(default = "GhbConfig::default_index_entries")]
    pub index_entries: usize,

    /// Backward chain-walk depth (deltas gathered per prediction attempt).
    #[serde(default = "GhbConfig::default_lookback")]
    pub lookback: usize,

    /// Maximum candidates projected per correlation match.
    #[serde(default = "GhbConfig::default_degree")]
    pub degree: usize,

    /// Correlation scan mode over the gathered delta window.
    #[serde(default)]
    pub match_scan: MatchScan,
}

impl GhbConfig {
    /// Returns the default miss-history capacity.
    fn default_buffer_entries() -> usize {
        defaults::GHB_BUFFER_ENTRIES
    }

    /// Returns the default index-table capacity.
    fn default_index_entries() -> usize {
        defaults::GHB_INDEX_ENTRIES
    }

    /// Returns the default chain-walk depth.
    fn default_lookback() -> usize {
        defaults::GHB_LOOKBACK
    }

    /// Returns the default prefetch degree.
    fn default_degree() -> usize {
        defaults::GHB_DEGREE
    }
}

impl Default for GhbConfig {
    fn default() -> Self {
        Self {
            buffer_entries: defaults::GHB_BUFFER_ENTRIES,
            index_entries: defaults::GHB_INDEX_ENTRIES,
            lookback: defaults::GHB_LOOKBACK,
            degree: defaults::GHB_DEGREE,
            match_scan: MatchScan::default(),
        }
    }
}

/// Errors raised while parsing or validating a configuration.
///
/// Prediction itself never fails; configuration handling is the only
/// fallible surface of the library.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    #[error("malformed configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A capacity or window parameter is below its usable minimum.
    #[error("{field} must be at least {min} (got {got})")]
    TooSmall {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Smallest usable value.
        min: usize,
        /// Value found in the configuration.
        got: usize,
    },
}
