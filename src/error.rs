//! Error kinds that need their own `Display` text beyond a bare `anyhow::anyhow!`.
//!
//! Most failures in this crate (bad CLI flags, missing files, malformed config
//! lines) are just `anyhow::Context`-wrapped I/O or parse errors. The few
//! cases below are numerical contracts worth naming explicitly: a reader
//! should be able to grep for `SolverError` and find every place the solver
//! can refuse to run rather than silently misbehave.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error(
        "action abstraction produced {found} actions at round {round}, exceeding the compiled-in \
         limit of {max}; widen MAX_ABSTRACT_ACTIONS or coarsen the action abstraction"
    )]
    TooManyActions { round: usize, found: usize, max: usize },

    #[error(
        "checkpoint file has entry type tag {found} but this build expects {expected} for round \
         {round}; the dump was written by a build with a different entry-type table"
    )]
    EntryTypeMismatch { round: usize, expected: u8, found: u8 },

    #[error(
        "average-strategy counter overflowed at round {round} bucket {bucket} soln_idx {soln_idx}; \
         widen the round's average-strategy type or coarsen the card abstraction"
    )]
    AverageStrategyOverflow { round: usize, bucket: u64, soln_idx: u64 },

    #[error("game definition is malformed: {0}")]
    BadGameDef(String),

    #[error("player file is malformed: {0}")]
    BadPlayerFile(String),
}
