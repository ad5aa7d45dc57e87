//! A machine shared between tasks.

use super::{Machine, MachineError};
use crate::core::State;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// A [`Machine`] behind an async mutex.
///
/// Transitions queue on the mutex in arrival order and run to completion one
/// at a time, hooks included. Clones refer to the same machine.
pub struct SharedMachine<S: State, C> {
    inner: Arc<Mutex<Machine<S, C>>>,
}

impl<S: State, C> Clone for SharedMachine<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State, C: Send + 'static> SharedMachine<S, C> {
    pub fn new(machine: Machine<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Exclusive access for several calls in a row.
    pub async fn lock(&self) -> MutexGuard<'_, Machine<S, C>> {
        self.inner.lock().await
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> S {
        self.inner.lock().await.state().clone()
    }

    pub async fn can<Q>(&self, to: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.can(to)
    }

    pub async fn will<Q>(&self, waypoints: &[&Q]) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.will(waypoints)
    }

    pub async fn trigger(&self, name: &str) -> Result<(), MachineError> {
        self.inner.lock().await.trigger(name).await
    }

    pub async fn to<Q>(&self, to: &Q) -> Result<(), MachineError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.to(to).await
    }

    pub async fn thru<Q>(&self, waypoints: &[&Q]) -> Result<(), MachineError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.thru(waypoints).await
    }

    /// The machine back, if no other clone is alive.
    pub fn try_unwrap(self) -> Result<Machine<S, C>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
