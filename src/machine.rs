//! This module defines `Machine`, the validated and immutable form of a machine
//! definition. A `Machine` is built once, may be shared freely between threads, and
//! can be run any number of times.

use crate::definition::{MachineDefinition, TransitionDefinition};
use crate::engine::{Execution, RunResult};
use crate::transition::TransitionTable;
use crate::types::{State, Symbol, TuringMachineError, ValidationError, DEFAULT_MAX_STEPS};
use crate::validator::{checked_transitions, lint};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    name: Option<String>,
    states: HashSet<State>,
    alphabet: HashSet<Symbol>,
    tape_alphabet: HashSet<Symbol>,
    transitions: TransitionTable,
    initial_state: State,
    blank: Symbol,
    final_states: HashSet<State>,
}

impl Machine {
    /// Validates `definition` and builds a `Machine` from it.
    ///
    /// Fails with the first violated invariant. Lint findings do not fail
    /// construction; they are logged as warnings.
    pub fn new(definition: MachineDefinition) -> Result<Self, ValidationError> {
        let transitions = checked_transitions(&definition)?;

        let machine = Self {
            name: definition.name,
            states: definition.states.into_iter().collect(),
            alphabet: definition.alphabet.into_iter().collect(),
            tape_alphabet: definition.tape_alphabet.into_iter().collect(),
            transitions,
            initial_state: definition.initial_state,
            blank: definition.blank_symbol,
            final_states: definition.final_states.into_iter().collect(),
        };

        for warning in lint(&machine) {
            warn!(machine = machine.display_name(), %warning, "machine lint");
        }

        Ok(machine)
    }

    /// Runs the machine on `input` for at most `max_steps` transitions.
    pub fn run(&self, input: &str, max_steps: usize) -> Result<RunResult, TuringMachineError> {
        Execution::new(self, input)?.run(max_steps)
    }

    /// Runs the machine with the default step ceiling.
    pub fn run_default(&self, input: &str) -> Result<RunResult, TuringMachineError> {
        self.run(input, DEFAULT_MAX_STEPS)
    }

    /// Converts the machine back into a definition document.
    ///
    /// Collections are emitted sorted so the output is stable.
    pub fn to_definition(&self) -> MachineDefinition {
        let mut transitions: Vec<_> = self
            .transitions
            .iter()
            .map(|(from, read, action)| TransitionDefinition {
                from: from.clone(),
                read: read.clone(),
                to: action.next_state.clone(),
                write: action.write.clone(),
                direction: action.direction.as_token().to_string(),
            })
            .collect();
        transitions.sort_by(|a, b| (&a.from, &a.read).cmp(&(&b.from, &b.read)));

        MachineDefinition {
            name: self.name.clone(),
            states: sorted(&self.states),
            alphabet: sorted(&self.alphabet),
            tape_alphabet: sorted(&self.tape_alphabet),
            blank_symbol: self.blank.clone(),
            initial_state: self.initial_state.clone(),
            final_states: sorted(&self.final_states),
            transitions,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name, or a placeholder for unnamed machines.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }

    /// Returns the input alphabet.
    pub fn alphabet(&self) -> &HashSet<Symbol> {
        &self.alphabet
    }

    pub fn tape_alphabet(&self) -> &HashSet<Symbol> {
        &self.tape_alphabet
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    pub fn final_states(&self) -> &HashSet<State> {
        &self.final_states
    }

    /// Returns true if `state` is accepting.
    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }
}

impl TryFrom<MachineDefinition> for Machine {
    type Error = ValidationError;

    fn try_from(definition: MachineDefinition) -> Result<Self, Self::Error> {
        Machine::new(definition)
    }
}

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort();
    items
}
