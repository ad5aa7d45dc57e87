//! Fluent builder for machine factories.

use crate::builder::definition::Definition;
use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Sources, State, TransitionDef};
use crate::lifecycle::{self, Handler, HandlerMap, HookResult};
use crate::machine::{MachineFactory, MachineOptions};
use futures::future::BoxFuture;

/// Collects transitions, handlers and options, then compiles them into a
/// [`MachineFactory`].
///
/// Transitions are kept in declaration order. Declaring a name twice keeps
/// the first position and the last definition.
pub struct MachineFactoryBuilder<S: State, C> {
    transitions: Vec<TransitionDef<S>>,
    handlers: HandlerMap<C>,
    options: MachineOptions,
}

impl<S: State, C: Send + 'static> MachineFactoryBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            handlers: HandlerMap::new(),
            options: MachineOptions::default(),
        }
    }

    /// Declare a transition from one or more states to `to`.
    pub fn transition(
        self,
        name: impl Into<String>,
        from: impl Into<Sources<S>>,
        to: S,
    ) -> Self {
        self.add_transition(TransitionDef::new(name, from, to))
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDef<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = TransitionDef<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn define(self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        Ok(self.add_transition(builder.build()?))
    }

    /// Take transitions and options from a declarative definition.
    pub fn definition(mut self, definition: Definition<S>) -> Self {
        self.transitions.extend(definition.transition_defs());
        self.options = definition.options;
        self
    }

    /// Register a synchronous handler under a hook key such as `onEnterC`.
    pub fn on<F>(self, hook: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut C) -> HookResult + Send + Sync + 'static,
    {
        self.handler(hook, lifecycle::sync_handler(f))
    }

    /// Register an async handler under a hook key.
    ///
    /// ```
    /// use wayfarer::MachineFactory;
    ///
    /// let factory = MachineFactory::<&str, Vec<String>>::builder()
    ///     .transition("go", "A", "B")
    ///     .on_async("onEnterB", |log: &mut Vec<String>| {
    ///         Box::pin(async move {
    ///             log.push("entered B".to_string());
    ///             anyhow::Ok(())
    ///         })
    ///     })
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(factory.handlers().contains("onEnterB"));
    /// ```
    pub fn on_async<F>(self, hook: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult> + Send + Sync + 'static,
    {
        self.handler(hook, lifecycle::handler(f))
    }

    /// Register an already-wrapped handler.
    pub fn handler(mut self, hook: impl Into<String>, handler: Handler<C>) -> Self {
        self.handlers.insert(hook, handler);
        self
    }

    /// Key holding the state in machine records (default `"state"`).
    pub fn state_key(mut self, key: impl Into<String>) -> Self {
        self.options.state_key = key.into();
        self
    }

    /// Allow `thru` to the current state to search for a cycle.
    pub fn allow_cyclical_transitions(mut self, allow: bool) -> Self {
        self.options.allow_cyclical_transitions = allow;
        self
    }

    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the factory.
    /// Returns an error if no transitions were declared.
    pub fn build(self) -> Result<MachineFactory<S, C>, BuildError> {
        MachineFactory::new(&self.transitions, self.handlers, self.options)
    }
}

impl<S: State, C: Send + 'static> Default for MachineFactoryBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_transitions() {
        let result = MachineFactoryBuilder::<&str, ()>::new().build();
        let err = result.unwrap_err();
        assert!(matches!(err, BuildError::NoTransitions));
        assert_eq!(err.to_string(), "No transitions supplied");
    }

    #[test]
    fn define_propagates_builder_errors() {
        let result = MachineFactoryBuilder::<&str, ()>::new()
            .define(TransitionBuilder::new("init").from("A"));
        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn options_are_applied() {
        let factory = MachineFactoryBuilder::<&str, ()>::new()
            .transition("go", "A", "B")
            .state_key("beam")
            .allow_cyclical_transitions(true)
            .build()
            .unwrap();

        assert_eq!(factory.options().state_key, "beam");
        assert!(factory.options().allow_cyclical_transitions);
    }

    #[test]
    fn definition_seeds_transitions_and_options() {
        let definition = Definition::<String>::from_json(
            r#"{
                "transitions": {
                    "init":  { "from": ["A", "B"], "to": "C" },
                    "reset": { "from": ["B", "C"], "to": "A" }
                },
                "stateKey": "beam"
            }"#,
        )
        .unwrap();

        let factory = MachineFactoryBuilder::<String, ()>::new()
            .definition(definition)
            .on("onEnterC", |_| Ok(()))
            .build()
            .unwrap();

        assert_eq!(factory.states(), ["A", "B", "C"]);
        assert_eq!(factory.options().state_key, "beam");
        assert_eq!(factory.handlers().keys(), ["onEnterC"]);
    }

    #[test]
    fn later_handlers_replace_earlier_ones() {
        let factory = MachineFactoryBuilder::<&str, u32>::new()
            .transition("go", "A", "B")
            .on("onGo", |n| {
                *n += 1;
                Ok(())
            })
            .on("onGo", |n| {
                *n += 100;
                Ok(())
            })
            .build()
            .unwrap();

        assert_eq!(factory.handlers().len(), 1);
    }
}
