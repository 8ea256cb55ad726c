use thiserror::Error;

/** errors raised while reading an instance, solving it, or decoding the answer.

Only a true UNSAT answer from the solver is a normal outcome: everything in
here propagates up to the caller.
*/
#[derive(Debug, Error)]
pub enum Error {
    /// malformed input file or graph (bad header, edge out of range, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// the solver could not be invoked at all (missing executable, ...)
    #[error("solver unavailable: {0}")]
    AdapterUnavailable(String),

    /// the solver answered something that is neither UNSAT nor a model
    #[error("malformed solver output: {0}")]
    MalformedSolverOutput(String),

    /// the decoded model is not a partition (encoding/decoding mismatch)
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    /// the solver process exceeded its time limit
    #[error("solver timed out after {0:.1} seconds")]
    SolverTimeout(f32),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// stats export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;
