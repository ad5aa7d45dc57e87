//! Build errors for factories, transitions and definitions.

use thiserror::Error;

/// Errors that can occur when building a machine factory.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No transitions supplied")]
    NoTransitions,

    #[error("Transition name not specified. Call TransitionBuilder::new(name)")]
    MissingName,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Invalid definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}
