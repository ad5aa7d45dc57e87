//! Wayfarer: a declarative finite state machine runtime
//!
//! A machine is declared as named transitions between states. Wayfarer
//! builds the transition graph once per factory and binds any number of
//! machines to it, each owning a caller-supplied context.
//!
//! # Core Concepts
//!
//! - **State**: any `Clone + Eq + Hash` identifier with a name, via the `State` trait
//! - **Factory**: an immutable, shareable graph plus lifecycle handlers
//! - **Machine**: a context bound to a current state, moved only by transitions
//! - **Lifecycle**: async handlers run in a fixed order around every commit
//! - **Planning**: `thru` walks the shortest path through a list of waypoints
//!
//! # Example
//!
//! ```rust
//! use wayfarer::MachineFactory;
//!
//! #[derive(Default)]
//! struct Order {
//!     audit: Vec<String>,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = MachineFactory::<&str, Order>::builder()
//!     .transition("process", ["PENDING", "ERRORED"], "PROCESSING")
//!     .transition("review", "PROCESSING", "IN_REVIEW")
//!     .transition("pass", ["PROCESSING", "IN_REVIEW"], "PASSED")
//!     .transition("fail", "IN_REVIEW", "FAILED")
//!     .transition("error", "PROCESSING", "ERRORED")
//!     .on("onEnterPASSED", |order: &mut Order| {
//!         order.audit.push("passed".to_string());
//!         Ok(())
//!     })
//!     .build()?;
//!
//! let mut order = factory.create(Order::default(), "PENDING")?;
//! assert!(order.can("PROCESSING"));
//! assert_eq!(
//!     order.path(&["PASSED"]),
//!     Some(vec![(&"PENDING", &"PROCESSING"), (&"PROCESSING", &"PASSED")])
//! );
//!
//! order.thru(&["PASSED"]).await?;
//! assert_eq!(*order.state(), "PASSED");
//! assert_eq!(order.context().audit, ["passed"]);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod graph;
pub mod lifecycle;
pub mod logging;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, Definition, MachineFactoryBuilder, TransitionBuilder};
pub use core::{State, StateHistory, StateTransition, TransitionDef};
pub use graph::GraphExport;
pub use machine::{Machine, MachineError, MachineFactory, MachineOptions, SharedMachine};
