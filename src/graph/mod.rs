//! The transition graph.
//!
//! States are interned into dense `usize` indices at construction time; every
//! edge, join and planned path is expressed in those indices and only turned
//! back into states at the API boundary.
//!
//! - [`Graph::build`] turns declarative transitions into the states set, the
//!   per-transition edge lists and the global edge list
//! - [`Joins`] inverts the global edge list for backward search
//! - [`Planner`] finds shortest multi-hop paths over the joins
//! - the resolver methods map edges back to transition names
//! - [`GraphExport`] is the serializable view for external renderers

mod export;
mod joins;
mod planner;
mod resolver;

pub use export::GraphExport;
pub use joins::Joins;
pub use planner::Planner;

use crate::builder::BuildError;
use crate::core::{State, TransitionDef};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Dense index of a state inside a [`Graph`].
pub type StateIndex = usize;

/// A directed `(from, to)` pair of state indices.
pub type Edge = (StateIndex, StateIndex);

/// Edges realizing one named transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionEdges {
    pub name: String,
    pub edges: Vec<Edge>,
}

/// Immutable transition graph built once per factory.
#[derive(Clone, Debug)]
pub struct Graph<S: State> {
    states: Vec<S>,
    lookup: HashMap<S, StateIndex>,
    transitions: Vec<TransitionEdges>,
    edges: Vec<Edge>,
}

impl<S: State> Graph<S> {
    /// Build the graph from transition definitions in declaration order.
    ///
    /// States are collected in order of first appearance (sources before the
    /// target of each transition). A name declared twice keeps its first
    /// position and its last definition.
    pub fn build(definitions: &[TransitionDef<S>]) -> Result<Self, BuildError> {
        if definitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut graph = Self {
            states: Vec::new(),
            lookup: HashMap::new(),
            transitions: Vec::with_capacity(definitions.len()),
            edges: Vec::new(),
        };

        let mut declared: Vec<&TransitionDef<S>> = Vec::with_capacity(definitions.len());
        for def in definitions {
            match declared.iter_mut().find(|d| d.name == def.name) {
                Some(slot) => *slot = def,
                None => declared.push(def),
            }
        }

        for def in declared {
            let sources: Vec<StateIndex> = def.from.iter().map(|s| graph.intern(s)).collect();
            let target = graph.intern(&def.to);

            let mut edges: Vec<Edge> = Vec::with_capacity(sources.len());
            for source in sources {
                push_unique(&mut edges, (source, target));
            }

            graph.transitions.push(TransitionEdges {
                name: def.name.clone(),
                edges,
            });
        }

        for transition in &graph.transitions {
            for &edge in &transition.edges {
                push_unique(&mut graph.edges, edge);
            }
        }

        Ok(graph)
    }

    fn intern(&mut self, state: &S) -> StateIndex {
        if let Some(&index) = self.lookup.get(state) {
            return index;
        }
        let index = self.states.len();
        self.states.push(state.clone());
        self.lookup.insert(state.clone(), index);
        index
    }

    /// All states in order of first appearance.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn state(&self, index: StateIndex) -> &S {
        &self.states[index]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn index_of<Q>(&self, state: &Q) -> Option<StateIndex>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.get(state).copied()
    }

    pub fn contains<Q>(&self, state: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.contains_key(state)
    }

    /// Per-transition edge lists in declaration order.
    pub fn transitions(&self) -> &[TransitionEdges] {
        &self.transitions
    }

    pub fn transition_index(&self, name: &str) -> Option<usize> {
        self.transitions.iter().position(|t| t.name == name)
    }

    pub fn transition_name(&self, index: usize) -> &str {
        &self.transitions[index].name
    }

    pub fn transition_edges(&self, index: usize) -> &[Edge] {
        &self.transitions[index].edges
    }

    /// The deduplicated union of every transition's edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Transitions with at least one edge leaving `from`, in declaration order.
    pub fn outgoing(&self, from: StateIndex) -> impl Iterator<Item = usize> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.edges.iter().any(|&(source, _)| source == from))
            .map(|(index, _)| index)
    }
}

fn push_unique(edges: &mut Vec<Edge>, edge: Edge) {
    if !edges.contains(&edge) {
        edges.push(edge);
    }
}
