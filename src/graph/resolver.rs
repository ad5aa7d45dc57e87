//! Mapping edges back to the transition names that realize them.
//!
//! Direct lookups (`to`, `edge`) take the last declared match while planned
//! multi-hop paths take the first. Both are kept as they are; callers rely
//! on the difference when several transitions share an edge.

use super::{Edge, Graph};
use crate::core::State;

impl<S: State> Graph<S> {
    /// Every transition realizing `edge`, in declaration order.
    pub fn resolve(&self, edge: Edge) -> impl Iterator<Item = usize> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.edges.contains(&edge))
            .map(|(index, _)| index)
    }

    /// Resolution for single-hop requests: the last declared match.
    pub fn resolve_direct(&self, edge: Edge) -> Option<usize> {
        self.resolve(edge).last()
    }

    /// Resolution for a leg of a planned path: the first declared match.
    pub fn resolve_planned(&self, edge: Edge) -> Option<usize> {
        self.resolve(edge).next()
    }
}
