//! Reverse-adjacency index over the global edge list.

use super::{Edge, StateIndex};

/// For every state, the states with a direct edge into it.
///
/// Sources of a target are ordered by the first appearance of each source as
/// the `from` side of the global edge list. The planner's tie-break between
/// equally short paths follows this order. The forward adjacency is kept
/// alongside for distance sweeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joins {
    sources: Vec<Vec<StateIndex>>,
    targets: Vec<Vec<StateIndex>>,
}

impl Joins {
    pub fn from_edges(edges: &[Edge], state_count: usize) -> Self {
        let mut forward: Vec<Vec<StateIndex>> = vec![Vec::new(); state_count];
        let mut order: Vec<StateIndex> = Vec::new();

        for &(from, to) in edges {
            if forward[from].is_empty() {
                order.push(from);
            }
            forward[from].push(to);
        }

        let mut sources: Vec<Vec<StateIndex>> = vec![Vec::new(); state_count];
        for from in order {
            for &to in &forward[from] {
                sources[to].push(from);
            }
        }

        Self {
            sources,
            targets: forward,
        }
    }

    pub fn state_count(&self) -> usize {
        self.sources.len()
    }

    /// States with a direct edge into `target`.
    pub fn sources(&self, target: StateIndex) -> &[StateIndex] {
        match self.sources.get(target) {
            Some(sources) => sources,
            None => &[],
        }
    }

    /// States `source` has a direct edge into, in edge-list order.
    pub fn targets(&self, source: StateIndex) -> &[StateIndex] {
        match self.targets.get(source) {
            Some(targets) => targets,
            None => &[],
        }
    }
}
