//! Factory configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STATE_KEY: &str = "state";

/// Options shared by every machine a factory creates.
///
/// Deserializes from camelCase keys (`stateKey`, `allowCyclicalTransitions`)
/// as well as their snake_case spellings; missing keys take the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineOptions {
    /// Key holding the state in machine records
    #[serde(default = "default_state_key", alias = "state_key")]
    pub state_key: String,

    /// Whether a `thru` to the current state may search for a cycle
    #[serde(default, alias = "allow_cyclical_transitions")]
    pub allow_cyclical_transitions: bool,
}

fn default_state_key() -> String {
    DEFAULT_STATE_KEY.to_string()
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            state_key: default_state_key(),
            allow_cyclical_transitions: false,
        }
    }
}
