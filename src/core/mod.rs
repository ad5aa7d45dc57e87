//! Core state machine types.
//!
//! This module contains the building blocks shared by the graph engine and
//! the machine runtime:
//! - State identifiers via the `State` trait
//! - Declarative transition definitions
//! - Committed transition history

mod history;
pub(crate) mod ordered;
mod state;
mod transition;

pub use history::{StateHistory, StateTransition};
pub use state::State;
pub use transition::{Sources, TransitionDef};
