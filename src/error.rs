//! Error types for sorting runs.

use crate::registry::Precondition;

/// Result type alias used by step primitives and algorithm bodies.
pub type Result<T> = std::result::Result<T, SortError>;

/// Everything that can stop an algorithm body before its final sweep.
///
/// `Cancelled`, `PreconditionFailed` and `Exhausted` are expected outcomes and the runner turns
/// them into a [`crate::RunOutcome`]. The remaining variants are defects and are handed back to
/// the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// The run's cancellation token fired.
    #[error("sorting run was cancelled")]
    Cancelled,

    /// The input violates a structural requirement of the algorithm.
    #[error("precondition failed: {0}")]
    PreconditionFailed(Precondition),

    /// A randomized algorithm spent its retry budget without reaching sorted order.
    #[error("gave up after {attempts} attempts without reaching sorted order")]
    Exhausted { attempts: u32 },

    /// The snapshot consumer can no longer accept snapshots.
    #[error("snapshot sink is closed")]
    SinkClosed,

    /// A body returned without leaving every element sorted and at rest.
    #[error("{algorithm} finished in an invalid state: {reason}")]
    Invariant {
        algorithm: &'static str,
        reason: String,
    },
}

impl SortError {
    /// True for failures that indicate a bug rather than an expected terminal state.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::SinkClosed | Self::Invariant { .. })
    }
}

/// Errors returned by [`crate::Visualizer`] commands.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// A run is in flight; the command is only valid while idle.
    #[error("a sorting run is already in progress")]
    Busy,

    /// `wait` was called without a run in flight.
    #[error("no sorting run has been started")]
    NoRun,

    /// The run task was aborted before it could report.
    #[error("sorting task failed: {0}")]
    Join(String),

    /// The run ended in a defect.
    #[error(transparent)]
    Sort(#[from] SortError),
}

/// Failure to parse a name from outside the crate (CLI, env, path keys).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("invalid speed '{0}', expected slow, normal, fast, very-fast, ultra-fast or milliseconds")]
    InvalidSpeed(String),
}
