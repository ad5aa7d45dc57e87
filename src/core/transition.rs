//! Declarative transition definitions.

use super::state::State;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The source side of a transition: one state or several.
///
/// Converts from a single state, an array or a `Vec`, so builders accept
/// `"A"`, `["A", "B"]` and `vec![..]` alike. Serialized as a list;
/// deserialized from either a single value or a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sources<S>(Vec<S>);

impl<S> Sources<S> {
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, state: S) {
        self.0.push(state);
    }
}

impl<S> Default for Sources<S> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<S> From<S> for Sources<S> {
    fn from(state: S) -> Self {
        Self(vec![state])
    }
}

impl<S> From<Vec<S>> for Sources<S> {
    fn from(states: Vec<S>) -> Self {
        Self(states)
    }
}

impl<S, const N: usize> From<[S; N]> for Sources<S> {
    fn from(states: [S; N]) -> Self {
        Self(states.into())
    }
}

impl<'a, S> IntoIterator for &'a Sources<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Serialize> Serialize for Sources<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for Sources<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany<S> {
            Many(Vec<S>),
            One(S),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::Many(states) => Self(states),
            OneOrMany::One(state) => Self(vec![state]),
        })
    }
}

/// A named transition from one or more source states to a single target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionDef<S: State> {
    pub name: String,
    pub from: Sources<S>,
    pub to: S,
}

impl<S: State> TransitionDef<S> {
    pub fn new(name: impl Into<String>, from: impl Into<Sources<S>>, to: S) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_accept_single_states_and_lists() {
        let one: Sources<&str> = "A".into();
        let many: Sources<&str> = ["A", "B"].into();
        let owned: Sources<&str> = vec!["C"].into();

        assert_eq!(one.as_slice(), ["A"]);
        assert_eq!(many.as_slice(), ["A", "B"]);
        assert_eq!(owned.as_slice(), ["C"]);
    }

    #[test]
    fn sources_deserialize_from_scalar_or_array() {
        let one: Sources<String> = serde_json::from_str(r#""PENDING""#).unwrap();
        let many: Sources<String> = serde_json::from_str(r#"["PENDING", "ERRORED"]"#).unwrap();
        let numeric: Sources<u32> = serde_json::from_str("3").unwrap();

        assert_eq!(one.as_slice(), ["PENDING".to_string()]);
        assert_eq!(many.len(), 2);
        assert_eq!(numeric.as_slice(), [3]);
    }

    #[test]
    fn sources_serialize_as_list() {
        let one: Sources<&str> = "A".into();
        assert_eq!(serde_json::to_string(&one).unwrap(), r#"["A"]"#);
    }

    #[test]
    fn transition_def_collects_sources() {
        let def = TransitionDef::new("pass", ["PROCESSING", "IN_REVIEW"], "PASSED");

        assert_eq!(def.name, "pass");
        assert_eq!(def.from.as_slice(), ["PROCESSING", "IN_REVIEW"]);
        assert_eq!(def.to, "PASSED");
    }
}
