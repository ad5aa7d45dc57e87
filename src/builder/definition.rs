//! Declarative machine definitions loaded from JSON.

use crate::builder::error::BuildError;
use crate::core::{Sources, State, TransitionDef};
use crate::machine::MachineOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Source and target of one transition inside a [`Definition`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionBody<S> {
    pub from: Sources<S>,
    pub to: S,
}

/// A machine described as data.
///
/// ```json
/// {
///   "transitions": {
///     "init":  { "from": ["A", "B"], "to": "C" },
///     "reset": { "from": ["B", "C"], "to": "A" }
///   },
///   "stateKey": "beam",
///   "allowCyclicalTransitions": false
/// }
/// ```
///
/// Transitions keep the order in which the document lists them. Handlers
/// are code and are attached on the builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>"))]
pub struct Definition<S: State> {
    #[serde(with = "crate::core::ordered")]
    pub transitions: Vec<(String, TransitionBody<S>)>,

    #[serde(flatten)]
    pub options: MachineOptions,
}

impl<S: State> Definition<S> {
    pub fn from_json(json: &str) -> Result<Self, BuildError>
    where
        S: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BuildError>
    where
        S: Serialize,
    {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn transition_defs(&self) -> Vec<TransitionDef<S>> {
        self.transitions
            .iter()
            .map(|(name, body)| TransitionDef {
                name: name.clone(),
                from: body.from.clone(),
                to: body.to.clone(),
            })
            .collect()
    }
}
