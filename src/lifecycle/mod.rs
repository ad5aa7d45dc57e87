//! Lifecycle hooks.
//!
//! Every transition runs a fixed pipeline of optional async handlers around
//! the state commit. Handlers are looked up by key; a key is a phase prefix
//! followed by the transition or state name with its first character
//! upper-cased (`onBeforeInit`, `onLeaveA`, `onInit`, `onEnterC`, `onC`,
//! `onAfterInit`). Keys without a handler run a no-op.

mod executor;
mod hooks;

pub use executor::Executor;
pub use hooks::{handler, hook_case, sync_handler, Handler, HandlerMap, HookResult, Phase, Step};
