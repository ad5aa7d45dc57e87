//! Factories hold one built graph and stamp out machines over it.

use super::cell::StateCell;
use super::{Machine, MachineError, MachineOptions};
use crate::builder::{BuildError, MachineFactoryBuilder};
use crate::core::{State, StateHistory, TransitionDef};
use crate::graph::{Graph, GraphExport, Joins, Planner};
use crate::lifecycle::{Executor, HandlerMap};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Immutable data shared by a factory and every machine it created.
pub(crate) struct Engine<S: State, C> {
    pub(crate) graph: Graph<S>,
    pub(crate) planner: Planner,
    pub(crate) executor: Executor<C>,
    pub(crate) options: MachineOptions,
}

/// A compiled machine definition.
///
/// Cloning is cheap; clones share the same graph and handlers.
pub struct MachineFactory<S: State, C> {
    engine: Arc<Engine<S, C>>,
}

impl<S: State, C> Clone for MachineFactory<S, C> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S: State, C: Send + 'static> MachineFactory<S, C> {
    pub fn builder() -> MachineFactoryBuilder<S, C> {
        MachineFactoryBuilder::new()
    }

    pub(crate) fn new(
        transitions: &[TransitionDef<S>],
        handlers: HandlerMap<C>,
        options: MachineOptions,
    ) -> Result<Self, BuildError> {
        let graph = Graph::build(transitions)?;
        let joins = Joins::from_edges(graph.edges(), graph.state_count());
        let planner = Planner::new(joins, options.allow_cyclical_transitions);

        debug!(
            states = graph.state_count(),
            transitions = graph.transitions().len(),
            edges = graph.edges().len(),
            handlers = handlers.len(),
            "machine factory built"
        );

        Ok(Self {
            engine: Arc::new(Engine {
                graph,
                planner,
                executor: Executor::new(handlers),
                options,
            }),
        })
    }

    /// Every state in order of first appearance.
    pub fn states(&self) -> &[S] {
        self.engine.graph.states()
    }

    pub fn graph(&self) -> &Graph<S> {
        &self.engine.graph
    }

    pub fn handlers(&self) -> &HandlerMap<C> {
        self.engine.executor.handlers()
    }

    pub fn options(&self) -> &MachineOptions {
        &self.engine.options
    }

    /// States and per-transition edges for rendering.
    pub fn export(&self) -> GraphExport {
        GraphExport::from_graph(&self.engine.graph)
    }

    /// Bind `context` to a new machine starting at `initial`.
    pub fn create(&self, context: C, initial: S) -> Result<Machine<S, C>, MachineError> {
        let Some(index) = self.engine.graph.index_of(&initial) else {
            warn!(state = %initial.name(), "rejected initial state");
            return Err(MachineError::InvalidInitialState(initial.name().into_owned()));
        };

        let machine = Machine {
            id: Uuid::new_v4(),
            engine: Arc::clone(&self.engine),
            cell: StateCell::new(index),
            context,
            history: StateHistory::new(),
        };
        debug!(machine = %machine.id, state = %initial.name(), "machine created");
        Ok(machine)
    }

    /// Create a machine from a JSON object.
    ///
    /// The state is read from the configured state key and the remaining
    /// fields deserialize as the context.
    pub fn create_from_record(&self, record: Value) -> Result<Machine<S, C>, MachineError>
    where
        S: DeserializeOwned,
        C: DeserializeOwned,
    {
        let mut fields = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(MachineError::InvalidRecord(format!(
                    "expected a JSON object, got {other}"
                )))
            }
        };

        let key = &self.engine.options.state_key;
        let raw = fields
            .remove(key)
            .ok_or_else(|| MachineError::InvalidInitialState("undefined".to_string()))?;
        let initial: S = serde_json::from_value(raw.clone())
            .map_err(|_| MachineError::InvalidInitialState(describe(&raw)))?;

        let context: C = serde_json::from_value(Value::Object(fields))
            .map_err(|e| MachineError::InvalidRecord(e.to_string()))?;

        self.create(context, initial)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<S: State, C> fmt::Debug for MachineFactory<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineFactory")
            .field("states", &self.engine.graph.states())
            .field("options", &self.engine.options)
            .field("handlers", self.engine.executor.handlers())
            .finish()
    }
}
