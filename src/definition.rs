//! The raw, unvalidated form of a machine definition.
//!
//! A `MachineDefinition` mirrors the fields of a definition document one to one. It is
//! produced by the JSON decoder or the text parser and turned into a `Machine` by
//! validation.

use crate::types::{State, Symbol, TuringMachineError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub states: Vec<State>,
    /// The input alphabet.
    pub alphabet: Vec<Symbol>,
    pub tape_alphabet: Vec<Symbol>,
    pub blank_symbol: Symbol,
    pub initial_state: State,
    pub final_states: Vec<State>,
    pub transitions: Vec<TransitionDefinition>,
}

/// A transition as written in a definition.
///
/// `direction` is kept as the raw token so a bad token surfaces as a validation
/// error rather than a decoding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub from: State,
    pub read: Symbol,
    pub to: State,
    pub write: Symbol,
    pub direction: String,
}

impl TransitionDefinition {
    pub fn new(
        from: impl Into<State>,
        read: impl Into<Symbol>,
        to: impl Into<State>,
        write: impl Into<Symbol>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            read: read.into(),
            to: to.into(),
            write: write.into(),
            direction: direction.into(),
        }
    }
}

impl MachineDefinition {
    /// Decodes a definition from a JSON document.
    pub fn from_json(content: &str) -> Result<Self, TuringMachineError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Encodes the definition as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TuringMachineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLACE_A: &str = r#"{
        "states": ["q0", "qf"],
        "alphabet": ["a"],
        "tape_alphabet": ["a", "X", "_"],
        "blank_symbol": "_",
        "initial_state": "q0",
        "final_states": ["qf"],
        "transitions": [
            {"from": "q0", "read": "a", "to": "q0", "write": "X", "direction": "R"},
            {"from": "q0", "read": "_", "to": "qf", "write": "_", "direction": "R"}
        ]
    }"#;

    #[test]
    fn test_decode_json_definition() {
        let definition = MachineDefinition::from_json(REPLACE_A).unwrap();

        assert_eq!(definition.name, None);
        assert_eq!(definition.states, vec!["q0", "qf"]);
        assert_eq!(definition.blank_symbol, "_");
        assert_eq!(definition.transitions.len(), 2);
        assert_eq!(
            definition.transitions[0],
            TransitionDefinition::new("q0", "a", "q0", "X", "R")
        );
    }

    #[test]
    fn test_unknown_direction_still_decodes() {
        let content = REPLACE_A.replace("\"direction\": \"R\"}\n", "\"direction\": \"S\"}\n");
        let definition = MachineDefinition::from_json(&content).unwrap();
        assert_eq!(definition.transitions[1].direction, "S");
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let result = MachineDefinition::from_json(r#"{"states": ["q0"]}"#);
        assert!(matches!(result, Err(TuringMachineError::JsonError(_))));
    }

    #[test]
    fn test_json_encoding_preserves_definition() {
        let definition = MachineDefinition::from_json(REPLACE_A).unwrap();
        let encoded = definition.to_json().unwrap();
        assert!(!encoded.contains("\"name\""));
        assert_eq!(MachineDefinition::from_json(&encoded).unwrap(), definition);
    }
}
