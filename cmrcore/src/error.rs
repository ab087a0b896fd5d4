use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// The workflow mechanism refused the transition, typically because
    /// a guard condition did not hold.
    #[error("transition {transition:?} rejected for {res:?}: {reason}")]
    TransitionRejected {
        res: String,
        transition: String,
        reason: String,
    },
    /// Denotes custom application invariant; generally informative.
    #[error("application invariant violated: {0}")]
    AppInvariantViolation(String),
    #[error("unknown error")]
    Unknown,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("unsupported value: {0}")]
    Unsupported(String),
    #[error("uninitialized value")]
    Uninitialized,
}
