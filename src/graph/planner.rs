//! Shortest-path planning for multi-hop transitions.

use super::{Edge, Joins, StateIndex};
use std::collections::VecDeque;
use tracing::trace;

/// Plans the shortest chain of edges through a list of waypoints.
///
/// Each leg `(a, b)` is found in two passes. A breadth-first sweep forward
/// from `a` records the edge distance of every state it reaches. The path is
/// then walked backwards from `b` over the [`Joins`], taking at each step the
/// first source in candidate order that is exactly one hop closer to `a`.
/// Among equally short paths this picks the one whose states, read from `b`
/// backwards, come earliest in candidate order. Both passes are linear in the
/// size of the graph.
#[derive(Clone, Debug)]
pub struct Planner {
    joins: Joins,
    allow_cyclical_transitions: bool,
}

impl Planner {
    pub fn new(joins: Joins, allow_cyclical_transitions: bool) -> Self {
        Self {
            joins,
            allow_cyclical_transitions,
        }
    }

    pub fn joins(&self) -> &Joins {
        &self.joins
    }

    pub fn allows_cyclical_transitions(&self) -> bool {
        self.allow_cyclical_transitions
    }

    /// A two-state chain that starts and ends on the same state, while
    /// cyclical transitions are disallowed. Rejected without searching.
    pub fn is_trivial_cycle(&self, chain: &[StateIndex]) -> bool {
        !self.allow_cyclical_transitions && chain.len() == 2 && chain[0] == chain[1]
    }

    /// Plan the edges visiting `chain` in order, starting at `chain[0]`.
    ///
    /// Returns `None` when any leg is unreachable or the chain is a trivial
    /// cycle. A chain with no waypoints yields an empty plan.
    pub fn plan(&self, chain: &[StateIndex]) -> Option<Vec<Edge>> {
        if self.is_trivial_cycle(chain) {
            return None;
        }

        let mut sequence: Vec<StateIndex> = Vec::new();
        for leg in chain.windows(2) {
            let path = self.shortest_path(leg[0], leg[1])?;
            let skip = usize::from(!sequence.is_empty());
            sequence.extend(path.into_iter().skip(skip));
        }

        let edges: Vec<Edge> = sequence.windows(2).map(|pair| (pair[0], pair[1])).collect();
        trace!(?chain, ?edges, "planned path");
        Some(edges)
    }

    /// Shortest forward state sequence from `from` to `to`, both inclusive.
    ///
    /// When `from == to` the result is a cycle through at least one edge.
    pub fn shortest_path(&self, from: StateIndex, to: StateIndex) -> Option<Vec<StateIndex>> {
        let distance = self.distances_from(from)?;
        let hops = |state: StateIndex| distance.get(state).copied().flatten();

        // measured through the sources so `from == to` needs a real cycle
        let mut remaining = self
            .joins
            .sources(to)
            .iter()
            .filter_map(|&source| hops(source))
            .min()?
            + 1;

        let mut path = vec![to];
        let mut frontier = to;
        while remaining > 0 {
            remaining -= 1;
            frontier = self
                .joins
                .sources(frontier)
                .iter()
                .copied()
                .find(|&source| hops(source) == Some(remaining))?;
            path.push(frontier);
        }

        path.reverse();
        Some(path)
    }

    /// Edge distance from `from` to every state, `None` where unreachable.
    fn distances_from(&self, from: StateIndex) -> Option<Vec<Option<usize>>> {
        let mut distance = vec![None; self.joins.state_count()];
        *distance.get_mut(from)? = Some(0);

        let mut queue = VecDeque::from([from]);
        while let Some(state) = queue.pop_front() {
            let Some(hops) = distance[state] else {
                continue;
            };
            for &target in self.joins.targets(state) {
                if distance[target].is_none() {
                    distance[target] = Some(hops + 1);
                    queue.push_back(target);
                }
            }
        }
        Some(distance)
    }
}
