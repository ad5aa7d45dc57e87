//! Builder API for machine factories.
//!
//! Factories can be assembled in code with [`MachineFactoryBuilder`] and
//! [`TransitionBuilder`], or loaded from a JSON [`Definition`]. Handlers are
//! always attached in code.

mod definition;
mod error;
mod factory;
pub mod macros;
mod transition;

pub use definition::{Definition, TransitionBody};
pub use error::BuildError;
pub use factory::MachineFactoryBuilder;
pub use transition::TransitionBuilder;
