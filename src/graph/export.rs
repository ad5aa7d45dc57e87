//! Serializable view of a graph for external renderers.

use super::Graph;
use crate::core::State;
use serde::{Deserialize, Serialize};

/// States and per-transition edges, by name, in declaration order.
///
/// Serializes as `{"states": [..], "edges": {"name": [["from", "to"], ..]}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub states: Vec<String>,
    #[serde(with = "crate::core::ordered")]
    pub edges: Vec<(String, Vec<(String, String)>)>,
}

impl GraphExport {
    pub fn from_graph<S: State>(graph: &Graph<S>) -> Self {
        let name = |index| graph.state(index).name().into_owned();
        Self {
            states: graph.states().iter().map(|s| s.name().into_owned()).collect(),
            edges: graph
                .transitions()
                .iter()
                .map(|t| {
                    let edges = t.edges.iter().map(|&(from, to)| (name(from), name(to)));
                    (t.name.clone(), edges.collect())
                })
                .collect(),
        }
    }

    /// Edges of one transition, if it exists.
    pub fn edges_of(&self, transition: &str) -> Option<&[(String, String)]> {
        self.edges
            .iter()
            .find(|(name, _)| name == transition)
            .map(|(_, edges)| edges.as_slice())
    }
}
