//! Runtime errors raised by machines.

use thiserror::Error;

/// Errors from creating or driving a machine.
///
/// A failed transition does not roll anything back. After an error the state
/// may or may not have changed; read [`Machine::state`](crate::Machine::state)
/// to find out.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Invalid initial state of: {0}")]
    InvalidInitialState(String),

    #[error("Invalid transition")]
    InvalidTransition,

    #[error("Invalid edge")]
    InvalidEdge,

    #[error("Missing lock")]
    MissingLock,

    #[error("Potential cyclic transition")]
    PotentialCyclicTransition,

    #[error("Unknown transition: {0}")]
    UnknownTransition(String),

    #[error("Hook {hook} failed: {source}")]
    Hook {
        hook: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_match_public_contract() {
        assert_eq!(
            MachineError::InvalidInitialState("Z".into()).to_string(),
            "Invalid initial state of: Z"
        );
        assert_eq!(MachineError::InvalidTransition.to_string(), "Invalid transition");
        assert_eq!(MachineError::InvalidEdge.to_string(), "Invalid edge");
        assert_eq!(MachineError::MissingLock.to_string(), "Missing lock");
        assert_eq!(
            MachineError::PotentialCyclicTransition.to_string(),
            "Potential cyclic transition"
        );
        assert_eq!(
            MachineError::UnknownTransition("launch".into()).to_string(),
            "Unknown transition: launch"
        );
    }

    #[test]
    fn hook_errors_keep_their_source() {
        let err = MachineError::Hook {
            hook: "onEnterC".into(),
            source: anyhow::anyhow!("disk full"),
        };

        assert_eq!(err.to_string(), "Hook onEnterC failed: disk full");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }
}
