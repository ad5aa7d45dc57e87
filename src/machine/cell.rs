//! The guarded state slot.

use crate::graph::StateIndex;

/// Capability required to write a [`StateCell`].
///
/// Only the transition pipeline holds one. Code outside this crate cannot
/// name the type, so it cannot move a machine without running a transition.
#[derive(Debug)]
pub(crate) struct Lock(());

pub(crate) const LOCK: Lock = Lock(());

/// Current state of a machine, stored as a graph index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StateCell {
    index: StateIndex,
}

impl StateCell {
    pub(crate) fn new(index: StateIndex) -> Self {
        Self { index }
    }

    pub(crate) fn get(&self) -> StateIndex {
        self.index
    }

    pub(crate) fn set(&mut self, index: StateIndex, _lock: &Lock) {
        self.index = index;
    }
}
