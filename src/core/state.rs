//! Core State trait for state machine states.
//!
//! States are opaque identifiers. Strings, integers and plain enums all work;
//! the only thing the runtime needs beyond equality and hashing is a name,
//! which keys lifecycle hooks and the exported graph.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure. A state is an immutable value describing a position
/// in the transition graph.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `Eq` + `Hash`: states are interned into the graph's index
/// - `Debug`: states are debuggable for diagnostics
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use wayfarer::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> Cow<'_, str> {
///         match self {
///             Self::Pending => Cow::Borrowed("Pending"),
///             Self::Running => Cow::Borrowed("Running"),
///             Self::Complete => Cow::Borrowed("Complete"),
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// assert_eq!("Pending".name(), "Pending");
/// assert_eq!(7u32.name(), "7");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for hook keys, logging and graph export.
    fn name(&self) -> Cow<'_, str>;
}

impl State for String {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl State for &'static str {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

macro_rules! impl_state_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl State for $ty {
                fn name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_state_for_integers!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
