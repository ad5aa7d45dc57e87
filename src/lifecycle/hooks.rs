//! Handler storage and hook naming.

use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of a lifecycle handler.
pub type HookResult = anyhow::Result<()>;

/// An async lifecycle handler.
///
/// Handlers borrow the machine's context mutably for the duration of the
/// returned future. They run one at a time, never concurrently.
pub type Handler<C> = Arc<dyn for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult> + Send + Sync>;

/// Wrap an async handler closure.
pub fn handler<C, F>(f: F) -> Handler<C>
where
    F: for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a synchronous handler closure.
pub fn sync_handler<C, F>(f: F) -> Handler<C>
where
    C: 'static,
    F: Fn(&mut C) -> HookResult + Send + Sync + 'static,
{
    handler(move |ctx: &mut C| future::ready(f(ctx)).boxed())
}

fn noop<C>(_: &mut C) -> BoxFuture<'_, HookResult> {
    future::ready(Ok(())).boxed()
}

/// Hook keys mapped to handlers, with a no-op for every absent key.
pub struct HandlerMap<C> {
    handlers: HashMap<String, Handler<C>>,
    noop: Handler<C>,
}

impl<C: 'static> HandlerMap<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            noop: Arc::new(noop::<C>),
        }
    }

    /// Register `handler` under `key`, replacing any earlier one.
    pub fn insert(&mut self, key: impl Into<String>, handler: Handler<C>) {
        self.handlers.insert(key.into(), handler);
    }

    /// The handler for `key`, or the shared no-op.
    pub fn get(&self, key: &str) -> &Handler<C> {
        self.handlers.get(key).unwrap_or(&self.noop)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C: 'static> Default for HandlerMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for HandlerMap<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            noop: Arc::clone(&self.noop),
        }
    }
}

impl<C> fmt::Debug for HandlerMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.handlers.keys().collect();
        keys.sort_unstable();
        f.debug_struct("HandlerMap").field("keys", &keys).finish()
    }
}

/// Upper-case the first character of `name`, leaving the rest unchanged.
///
/// ```
/// use wayfarer::lifecycle::hook_case;
///
/// assert_eq!(hook_case("inReview"), "InReview");
/// assert_eq!(hook_case("PASSED"), "PASSED");
/// assert_eq!(hook_case(""), "");
/// ```
pub fn hook_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The names one transition step is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step<'a> {
    pub transition: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

/// One slot of the lifecycle pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    Leave,
    Transition,
    Enter,
    State,
    After,
}

impl Phase {
    /// Phases run before the state is committed, in order.
    pub const PRE_COMMIT: [Phase; 3] = [Phase::Before, Phase::Leave, Phase::Transition];

    /// Phases run after the state is committed, in order.
    pub const POST_COMMIT: [Phase; 3] = [Phase::Enter, Phase::State, Phase::After];

    pub fn prefix(self) -> &'static str {
        match self {
            Phase::Before => "onBefore",
            Phase::Leave => "onLeave",
            Phase::Transition | Phase::State => "on",
            Phase::Enter => "onEnter",
            Phase::After => "onAfter",
        }
    }

    /// The handler key this phase looks up for `step`.
    pub fn key(self, step: &Step<'_>) -> String {
        let subject = match self {
            Phase::Before | Phase::Transition | Phase::After => step.transition,
            Phase::Leave => step.from,
            Phase::Enter | Phase::State => step.to,
        };
        format!("{}{}", self.prefix(), hook_case(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    #[test]
    fn phase_keys_follow_pipeline_naming() {
        let step = Step {
            transition: "review",
            from: "PROCESSING",
            to: "IN_REVIEW",
        };

        let keys: Vec<String> = Phase::PRE_COMMIT
            .iter()
            .chain(Phase::POST_COMMIT.iter())
            .map(|phase| phase.key(&step))
            .collect();

        assert_eq!(
            keys,
            [
                "onBeforeReview",
                "onLeavePROCESSING",
                "onReview",
                "onEnterIN_REVIEW",
                "onIN_REVIEW",
                "onAfterReview",
            ]
        );
    }

    #[test]
    fn hook_case_handles_unicode() {
        assert_eq!(hook_case("ärger"), "Ärger");
        assert_eq!(hook_case("7up"), "7up");
    }

    #[tokio::test]
    async fn absent_keys_fall_back_to_noop() {
        let map: HandlerMap<Counter> = HandlerMap::new();
        let mut ctx = Counter::default();

        assert!(!map.contains("onInit"));
        map.get("onInit")(&mut ctx).await.unwrap();
        assert_eq!(ctx.hits, 0);
    }

    #[tokio::test]
    async fn sync_and_async_handlers_mutate_context() {
        let mut map: HandlerMap<Counter> = HandlerMap::new();
        map.insert(
            "onInit",
            sync_handler(|ctx: &mut Counter| {
                ctx.hits += 1;
                Ok(())
            }),
        );
        map.insert(
            "onReset",
            handler(|ctx: &mut Counter| {
                Box::pin(async move {
                    tokio::task::yield_now().await;
                    ctx.hits += 10;
                    anyhow::Ok(())
                })
            }),
        );

        let mut ctx = Counter::default();
        map.get("onInit")(&mut ctx).await.unwrap();
        map.get("onReset")(&mut ctx).await.unwrap();

        assert_eq!(ctx.hits, 11);
        assert_eq!(map.keys(), ["onInit", "onReset"]);
    }
}
