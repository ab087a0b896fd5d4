use cmrcore::{
    ac::workflow::State,
    error::{
        BackendError,
        ValueError,
    },
};
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("no target state could be resolved for resource {0:?}")]
    UnresolvedTarget(String),
    #[error("no transition from {from} to {to}")]
    UnknownTransition {
        from: State,
        to: State,
    },
}
