//! The crate-wide error taxonomy (spec §7).
//!
//! Everything here is a *contract* error: a stale catalogue, a shape key
//! the catalogue never generated, or slide segments that fail to join on a
//! shared boundary pad. These indicate a bug in the caller (usually the
//! external parser) or in this crate, never a property of the chart being
//! analyzed — chart-level findings are returned as [`crate::engine::record::MuriRecord`]s,
//! not errors.

use thiserror::Error;

use crate::geometry::Pad;

/// Errors this crate can return from its fallible entry points.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum JudgeError {
    /// The slide catalogue was queried before [`crate::catalogue::init`] ran.
    #[error("slide catalogue accessed before init()")]
    CatalogueNotInitialized,

    /// No shape in the catalogue matches this key.
    #[error("unknown slide shape key: {0:?}")]
    UnknownShape(String),

    /// Two adjacent slide segments don't share a boundary pad set, so they
    /// cannot be concatenated into one `judge_sequence`.
    #[error("slide chain segments {prev_index} and {next_index} do not join: {prev_end} != {next_start}")]
    ChainNotContiguous {
        prev_index: usize,
        next_index: usize,
        prev_end: Pad,
        next_start: Pad,
    },

    /// A `SlideChain`/`Wifi` was constructed with mismatched parallel
    /// arrays (`durations` vs. `segment_infos`), violating the §3 invariant.
    #[error("slide chain has {durations} durations but {segments} segment infos")]
    SlideArityMismatch { durations: usize, segments: usize },
}

/// `Result` alias used throughout the crate's fallible entry points.
pub type JudgeResult<T> = Result<T, JudgeError>;
