//! State transition history tracking.
//!
//! Every machine keeps an ordered record of the state mutations it has
//! committed. A record is written at the moment the state changes, which is
//! mid-pipeline: a transition whose later hooks fail still shows up here.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
///
/// # Example
///
/// ```rust
/// use wayfarer::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     transition: "process".to_string(),
///     from: "PENDING",
///     to: "PROCESSING",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.transition, "process");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTransition<S: State> {
    /// Name of the transition that moved the machine
    pub transition: String,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the state was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed state transitions.
///
/// # Example
///
/// ```rust
/// use wayfarer::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
///
/// history.record(StateTransition {
///     transition: "process".to_string(),
///     from: "PENDING",
///     to: "PROCESSING",
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     transition: "pass".to_string(),
///     from: "PROCESSING",
///     to: "PASSED",
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, [&"PENDING", &"PROCESSING", &"PASSED"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a committed transition.
    pub fn record(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first source state, then
    /// the `to` state of each transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Get all transitions in commit order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Name of the most recently committed transition.
    pub fn last_transition(&self) -> Option<&str> {
        self.transitions.last().map(|t| t.transition.as_str())
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
