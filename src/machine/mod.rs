//! Machine instances.
//!
//! A [`Machine`] binds a caller-owned context to a position in a factory's
//! graph. The state is read-only from the outside and only moves through
//! transitions, which run the lifecycle pipeline around the commit.
//!
//! Mutating methods take `&mut self`, so one machine never runs two
//! transitions at once. Use [`SharedMachine`] to drive one machine from
//! several tasks.

mod cell;
mod error;
mod factory;
mod options;
mod shared;

pub use error::MachineError;
pub use factory::MachineFactory;
pub use options::{MachineOptions, DEFAULT_STATE_KEY};
pub use shared::SharedMachine;

use crate::core::{State, StateHistory, StateTransition};
use crate::graph::{Edge, StateIndex};
use crate::lifecycle::Step;
use cell::{StateCell, LOCK};
use chrono::Utc;
use factory::Engine;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A running state machine over context `C`.
pub struct Machine<S: State, C> {
    id: Uuid,
    engine: Arc<Engine<S, C>>,
    cell: StateCell,
    context: C,
    history: StateHistory<S>,
}

impl<S: State, C: Send + 'static> Machine<S, C> {
    /// Identifier attached to this machine's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &S {
        self.engine.graph.state(self.cell.get())
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Committed transitions, oldest first.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Direct writes are refused; the state only moves through transitions.
    ///
    /// Always fails with [`MachineError::MissingLock`].
    pub fn set_state(&mut self, state: S) -> Result<(), MachineError> {
        warn!(machine = %self.id, state = %state.name(), "refused direct state write");
        Err(MachineError::MissingLock)
    }

    /// Whether a single transition leads from the current state to `to`.
    pub fn can<Q>(&self, to: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let graph = &self.engine.graph;
        graph
            .index_of(to)
            .is_some_and(|target| graph.has_edge((self.cell.get(), target)))
    }

    /// Name of the transition that moves directly to `to`.
    ///
    /// When several transitions share the edge, the last declared wins.
    pub fn edge<Q>(&self, to: &Q) -> Result<&str, MachineError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.direct(to)
            .map(|transition| self.engine.graph.transition_name(transition))
            .ok_or(MachineError::InvalidEdge)
    }

    /// Names of every transition leaving the current state, in declaration
    /// order.
    pub fn transitions(&self) -> Vec<&str> {
        let graph = &self.engine.graph;
        graph
            .outgoing(self.cell.get())
            .map(|transition| graph.transition_name(transition))
            .collect()
    }

    /// Whether [`thru`](Self::thru) can reach every waypoint in order.
    pub fn will<Q>(&self, waypoints: &[&Q]) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.plan(waypoints).is_some()
    }

    /// The shortest path through `waypoints` as `(from, to)` pairs.
    pub fn path<Q>(&self, waypoints: &[&Q]) -> Option<Vec<(&S, &S)>>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let graph = &self.engine.graph;
        self.plan(waypoints).map(|edges| {
            edges
                .into_iter()
                .map(|(from, to)| (graph.state(from), graph.state(to)))
                .collect()
        })
    }

    /// Invoke the transition called `name` from the current state.
    pub async fn trigger(&mut self, name: &str) -> Result<(), MachineError> {
        let Some(transition) = self.engine.graph.transition_index(name) else {
            warn!(machine = %self.id, transition = name, "unknown transition");
            return Err(MachineError::UnknownTransition(name.to_string()));
        };
        self.fire(transition).await
    }

    /// Move directly to `to` through the transition [`edge`](Self::edge)
    /// names.
    pub async fn to<Q>(&mut self, to: &Q) -> Result<(), MachineError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(transition) = self.direct(to) else {
            warn!(machine = %self.id, from = %self.state().name(), "no direct transition");
            return Err(MachineError::InvalidTransition);
        };
        self.fire(transition).await
    }

    /// Walk the shortest path through `waypoints`, one transition at a time.
    ///
    /// Each leg resolves to the first declared transition realizing it. A
    /// failure part-way leaves the machine wherever the last commit put it.
    pub async fn thru<Q>(&mut self, waypoints: &[&Q]) -> Result<(), MachineError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let engine = Arc::clone(&self.engine);
        let chain = self.chain(waypoints);

        if chain
            .as_deref()
            .is_some_and(|chain| engine.planner.is_trivial_cycle(chain))
        {
            warn!(machine = %self.id, state = %self.state().name(), "refused cyclic thru");
            return Err(MachineError::PotentialCyclicTransition);
        }

        let plan: Option<Vec<usize>> = chain
            .and_then(|chain| engine.planner.plan(&chain))
            .and_then(|edges| {
                edges
                    .into_iter()
                    .map(|edge| engine.graph.resolve_planned(edge))
                    .collect()
            });
        let Some(plan) = plan else {
            warn!(machine = %self.id, from = %self.state().name(), "no path through waypoints");
            return Err(MachineError::InvalidTransition);
        };

        debug!(
            machine = %self.id,
            steps = ?plan.iter().map(|&t| engine.graph.transition_name(t)).collect::<Vec<_>>(),
            "walking planned path"
        );
        for transition in plan {
            self.fire(transition).await?;
        }
        Ok(())
    }

    /// Serialize into a record with the state at the configured key.
    ///
    /// The context must serialize to a JSON object.
    pub fn to_record(&self) -> Result<Value, MachineError>
    where
        S: Serialize,
        C: Serialize,
    {
        let invalid = |e: serde_json::Error| MachineError::InvalidRecord(e.to_string());

        let mut fields = match serde_json::to_value(&self.context).map_err(invalid)? {
            Value::Object(fields) => fields,
            other => {
                return Err(MachineError::InvalidRecord(format!(
                    "context must serialize to an object, got {other}"
                )))
            }
        };
        let state = serde_json::to_value(self.state()).map_err(invalid)?;
        fields.insert(self.engine.options.state_key.clone(), state);
        Ok(Value::Object(fields))
    }

    fn direct<Q>(&self, to: &Q) -> Option<usize>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let graph = &self.engine.graph;
        let target = graph.index_of(to)?;
        graph.resolve_direct((self.cell.get(), target))
    }

    /// The current state followed by every waypoint, or `None` if any
    /// waypoint is not a known state.
    fn chain<Q>(&self, waypoints: &[&Q]) -> Option<Vec<StateIndex>>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let graph = &self.engine.graph;
        std::iter::once(Some(self.cell.get()))
            .chain(waypoints.iter().map(|waypoint| graph.index_of(*waypoint)))
            .collect()
    }

    fn plan<Q>(&self, waypoints: &[&Q]) -> Option<Vec<Edge>>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chain(waypoints)
            .and_then(|chain| self.engine.planner.plan(&chain))
    }

    async fn fire(&mut self, transition: usize) -> Result<(), MachineError> {
        let engine = Arc::clone(&self.engine);
        let graph = &engine.graph;
        let name = graph.transition_name(transition);
        let from = self.cell.get();

        let Some(&(_, to)) = graph
            .transition_edges(transition)
            .iter()
            .find(|&&(source, _)| source == from)
        else {
            warn!(
                machine = %self.id,
                transition = name,
                from = %graph.state(from).name(),
                "transition not available from current state"
            );
            return Err(MachineError::InvalidTransition);
        };

        let (from_state, to_state) = (graph.state(from), graph.state(to));
        let (from_name, to_name) = (from_state.name(), to_state.name());
        let step = Step {
            transition: name,
            from: &from_name,
            to: &to_name,
        };

        let Self {
            id,
            cell,
            context,
            history,
            ..
        } = self;

        engine
            .executor
            .run(*id, &step, context, || {
                cell.set(to, &LOCK);
                history.record(StateTransition {
                    transition: name.to_string(),
                    from: from_state.clone(),
                    to: to_state.clone(),
                    timestamp: Utc::now(),
                });
                Ok(())
            })
            .await
    }
}

impl<S: State, C: fmt::Debug> fmt::Debug for Machine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("state", self.engine.graph.state(self.cell.get()))
            .field("context", &self.context)
            .field("transitions", &self.history.len())
            .finish()
    }
}
