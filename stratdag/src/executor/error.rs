//! Executor facade errors.

use std::time::Duration;

use thiserror::Error;

/// Error raised at the execute boundary.
///
/// Node-level failures are not errors here; they come back inside the
/// result's `Outcome`.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The initial input must be a success outcome; no node is run
    /// otherwise.
    #[error("input must be a success outcome")]
    InputNotSuccess,

    /// The deadline elapsed before the run produced a final candidate. The
    /// in-flight run keeps going in the background.
    #[error("execution timed out after {0:?}")]
    Timeout(Duration),

    /// The run's task could not be joined.
    #[error("execution task failed: {0}")]
    Runtime(String),
}
