//! Builder for constructing transition definitions.

use crate::builder::error::BuildError;
use crate::core::{Sources, State, TransitionDef};

/// Builder for a single named transition with a fluent API.
///
/// `.from()` may be called repeatedly to add source states.
pub struct TransitionBuilder<S: State> {
    name: String,
    from: Sources<S>,
    to: Option<S>,
}

impl<S: State> TransitionBuilder<S> {
    /// Create a new transition builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: Sources::default(),
            to: None,
        }
    }

    /// Add a source state (at least one required).
    pub fn from(mut self, state: S) -> Self {
        self.from.push(state);
        self
    }

    /// Add several source states.
    pub fn from_any(mut self, states: impl IntoIterator<Item = S>) -> Self {
        for state in states {
            self.from.push(state);
        }
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDef<S>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::MissingName);
        }
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionDef {
            name: self.name,
            from: self.from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<&str>::new("init").from("A").build();
        assert!(matches!(result, Err(BuildError::MissingToState)));

        let result = TransitionBuilder::<&str>::new("init").to("C").build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));

        let result = TransitionBuilder::<&str>::new("").from("A").to("C").build();
        assert!(matches!(result, Err(BuildError::MissingName)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let def = TransitionBuilder::new("pass")
            .from("PROCESSING")
            .from_any(["IN_REVIEW"])
            .to("PASSED")
            .build()
            .unwrap();

        assert_eq!(def.name, "pass");
        assert_eq!(def.from.as_slice(), ["PROCESSING", "IN_REVIEW"]);
        assert_eq!(def.to, "PASSED");
    }
}
