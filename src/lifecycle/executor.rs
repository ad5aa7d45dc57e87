//! The seven-phase transition pipeline.

use super::hooks::{HandlerMap, Phase, Step};
use crate::machine::MachineError;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs lifecycle handlers around a state commit.
///
/// Order: `onBefore<T>`, `onLeave<Old>`, `on<T>`, commit, `onEnter<New>`,
/// `on<New>`, `onAfter<T>`. The first failing handler stops the pipeline.
/// Nothing that already ran is undone, including the commit.
#[derive(Clone, Debug)]
pub struct Executor<C> {
    handlers: HandlerMap<C>,
}

impl<C> Executor<C> {
    pub fn handlers(&self) -> &HandlerMap<C> {
        &self.handlers
    }
}

impl<C: Send + 'static> Executor<C> {
    pub fn new(handlers: HandlerMap<C>) -> Self {
        Self { handlers }
    }

    /// Run the pipeline for one step. `commit` performs the state mutation.
    pub async fn run<F>(
        &self,
        machine: Uuid,
        step: &Step<'_>,
        ctx: &mut C,
        commit: F,
    ) -> Result<(), MachineError>
    where
        F: FnOnce() -> Result<(), MachineError> + Send,
    {
        for phase in Phase::PRE_COMMIT {
            self.invoke(machine, phase, step, ctx).await?;
        }

        commit()?;
        info!(
            machine = %machine,
            transition = step.transition,
            from = step.from,
            to = step.to,
            "state committed"
        );

        for phase in Phase::POST_COMMIT {
            self.invoke(machine, phase, step, ctx).await?;
        }
        Ok(())
    }

    async fn invoke(
        &self,
        machine: Uuid,
        phase: Phase,
        step: &Step<'_>,
        ctx: &mut C,
    ) -> Result<(), MachineError> {
        let hook = phase.key(step);
        debug!(
            machine = %machine,
            hook = %hook,
            ?phase,
            registered = self.handlers.contains(&hook),
            "running hook"
        );

        let handler = self.handlers.get(&hook);
        handler(ctx).await.map_err(|source| {
            warn!(machine = %machine, hook = %hook, error = %source, "hook failed");
            MachineError::Hook { hook, source }
        })
    }
}
