//! This module checks machine definitions before anything runs.
//!
//! `validate` enforces the structural invariants a `Machine` relies on and fails on
//! the first violation. `lint` looks for suspicious but legal constructs in an already
//! validated machine, such as unreachable states or symbols missing from the tape
//! alphabet, and reports them without failing.

use crate::definition::{MachineDefinition, TransitionDefinition};
use crate::machine::Machine;
use crate::transition::{Action, TransitionTable};
use crate::types::{Direction, State, Symbol, ValidationError};
use std::collections::HashSet;
use thiserror::Error;

/// A non-fatal finding about a validated machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// States that cannot be reached from the initial state.
    #[error("Unreachable states: {0:?}")]
    UnreachableStates(Vec<State>),
    /// Transition endpoints that are not declared states.
    #[error("Transitions reference undeclared states: {0:?}")]
    UndeclaredStates(Vec<State>),
    /// Symbols read or written by transitions that are not in the tape alphabet.
    #[error("Transitions use symbols outside the tape alphabet: {0:?}")]
    UndeclaredSymbols(Vec<Symbol>),
    /// Input symbols that are not also tape symbols.
    #[error("Input alphabet symbols missing from the tape alphabet: {0:?}")]
    InputNotInTapeAlphabet(Vec<Symbol>),
}

type Check = fn(&MachineDefinition) -> Result<(), ValidationError>;

/// Validates a definition, returning the first invariant it violates.
///
/// Checks run in a fixed order: blank symbol, initial state, final states, then each
/// transition in turn for its direction token and a duplicate `(state, symbol)` key.
pub fn validate(definition: &MachineDefinition) -> Result<(), ValidationError> {
    checked_transitions(definition).map(|_| ())
}

/// Runs every check and returns the transition table built along the way.
pub(crate) fn checked_transitions(
    definition: &MachineDefinition,
) -> Result<TransitionTable, ValidationError> {
    const CHECKS: [Check; 3] = [check_blank_symbol, check_initial_state, check_final_states];

    CHECKS.iter().try_for_each(|check| check(definition))?;
    build_transitions(&definition.transitions)
}

fn check_blank_symbol(definition: &MachineDefinition) -> Result<(), ValidationError> {
    if !definition.tape_alphabet.contains(&definition.blank_symbol) {
        return Err(ValidationError::BlankNotInTapeAlphabet(
            definition.blank_symbol.clone(),
        ));
    }

    Ok(())
}

fn check_initial_state(definition: &MachineDefinition) -> Result<(), ValidationError> {
    if !definition.states.contains(&definition.initial_state) {
        return Err(ValidationError::UnknownInitialState(
            definition.initial_state.clone(),
        ));
    }

    Ok(())
}

fn check_final_states(definition: &MachineDefinition) -> Result<(), ValidationError> {
    definition
        .final_states
        .iter()
        .find(|state| !definition.states.contains(state))
        .map_or(Ok(()), |state| {
            Err(ValidationError::UnknownFinalState(state.clone()))
        })
}

/// Rejects unknown direction tokens and repeated `(state, symbol)` keys.
fn build_transitions(
    definitions: &[TransitionDefinition],
) -> Result<TransitionTable, ValidationError> {
    let mut table = TransitionTable::default();

    for t in definitions {
        let direction = Direction::from_token(&t.direction).ok_or_else(|| {
            ValidationError::InvalidDirection {
                state: t.from.clone(),
                symbol: t.read.clone(),
                token: t.direction.clone(),
            }
        })?;

        let action = Action {
            next_state: t.to.clone(),
            write: t.write.clone(),
            direction,
        };

        if table.insert(t.from.clone(), t.read.clone(), action).is_some() {
            return Err(ValidationError::DuplicateTransition {
                state: t.from.clone(),
                symbol: t.read.clone(),
            });
        }
    }

    Ok(table)
}

/// Reports suspicious constructs in a validated machine.
///
/// Each warning lists its offending items sorted, so output is deterministic.
pub fn lint(machine: &Machine) -> Vec<LintWarning> {
    [
        lint_unreachable_states,
        lint_undeclared_states,
        lint_undeclared_symbols,
        lint_input_alphabet,
    ]
    .iter()
    .filter_map(|f| f(machine))
    .collect()
}

/// Walks the transition graph from the initial state.
fn lint_unreachable_states(machine: &Machine) -> Option<LintWarning> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = vec![machine.initial_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (from, _, action) in machine.transitions().iter() {
            if from == state && !visited.contains(action.next_state.as_str()) {
                queue.push(&action.next_state);
            }
        }
    }

    let unreachable = machine
        .states()
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .cloned();

    sorted(unreachable).map(LintWarning::UnreachableStates)
}

fn lint_undeclared_states(machine: &Machine) -> Option<LintWarning> {
    let undeclared = machine
        .transitions()
        .iter()
        .flat_map(|(from, _, action)| [from, &action.next_state])
        .filter(|state| !machine.states().contains(*state))
        .cloned();

    sorted(undeclared).map(LintWarning::UndeclaredStates)
}

fn lint_undeclared_symbols(machine: &Machine) -> Option<LintWarning> {
    let undeclared = machine
        .transitions()
        .iter()
        .flat_map(|(_, read, action)| [read, &action.write])
        .filter(|symbol| !machine.tape_alphabet().contains(*symbol))
        .cloned();

    sorted(undeclared).map(LintWarning::UndeclaredSymbols)
}

fn lint_input_alphabet(machine: &Machine) -> Option<LintWarning> {
    let missing = machine
        .alphabet()
        .iter()
        .filter(|symbol| !machine.tape_alphabet().contains(*symbol))
        .cloned();

    sorted(missing).map(LintWarning::InputNotInTapeAlphabet)
}

/// Sorts and dedups `items`, returning `None` when there are none.
fn sorted(items: impl Iterator<Item = String>) -> Option<Vec<String>> {
    let mut items: Vec<String> = items.collect();
    items.sort();
    items.dedup();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_definition(transitions: Vec<TransitionDefinition>) -> MachineDefinition {
        MachineDefinition {
            name: Some("Test Machine".to_string()),
            states: vec!["q0".into(), "qf".into()],
            alphabet: vec!["a".into()],
            tape_alphabet: vec!["a".into(), "X".into(), "_".into()],
            blank_symbol: "_".into(),
            initial_state: "q0".into(),
            final_states: vec!["qf".into()],
            transitions,
        }
    }

    fn replace_a_transitions() -> Vec<TransitionDefinition> {
        vec![
            TransitionDefinition::new("q0", "a", "q0", "X", "R"),
            TransitionDefinition::new("q0", "_", "qf", "_", "R"),
        ]
    }

    #[test]
    fn test_valid_definition() {
        let definition = create_test_definition(replace_a_transitions());
        assert_eq!(validate(&definition), Ok(()));
    }

    #[test]
    fn test_blank_not_in_tape_alphabet() {
        let mut definition = create_test_definition(replace_a_transitions());
        definition.blank_symbol = "B".into();

        assert_eq!(
            validate(&definition),
            Err(ValidationError::BlankNotInTapeAlphabet("B".into()))
        );
    }

    #[test]
    fn test_unknown_initial_state() {
        let mut definition = create_test_definition(replace_a_transitions());
        definition.initial_state = "start".into();

        assert_eq!(
            validate(&definition),
            Err(ValidationError::UnknownInitialState("start".into()))
        );
    }

    #[test]
    fn test_unknown_final_state() {
        let mut definition = create_test_definition(replace_a_transitions());
        definition.final_states = vec!["qf".into(), "accept".into()];

        assert_eq!(
            validate(&definition),
            Err(ValidationError::UnknownFinalState("accept".into()))
        );
    }

    #[test]
    fn test_invalid_direction() {
        let mut transitions = replace_a_transitions();
        transitions.push(TransitionDefinition::new("qf", "a", "qf", "a", "S"));
        let definition = create_test_definition(transitions);

        assert_eq!(
            validate(&definition),
            Err(ValidationError::InvalidDirection {
                state: "qf".into(),
                symbol: "a".into(),
                token: "S".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_transition() {
        let mut transitions = replace_a_transitions();
        transitions.push(TransitionDefinition::new("q0", "a", "qf", "a", "L"));
        let definition = create_test_definition(transitions);

        assert_eq!(
            validate(&definition),
            Err(ValidationError::DuplicateTransition {
                state: "q0".into(),
                symbol: "a".into(),
            })
        );
    }

    #[test]
    fn test_transitions_checked_in_order() {
        let mut transitions = replace_a_transitions();
        transitions.push(TransitionDefinition::new("q0", "a", "qf", "a", "L"));
        transitions.push(TransitionDefinition::new("qf", "a", "qf", "a", "S"));
        let definition = create_test_definition(transitions);

        assert!(matches!(
            validate(&definition),
            Err(ValidationError::DuplicateTransition { .. })
        ));
    }

    #[test]
    fn test_checked_transitions_builds_table() {
        let definition = create_test_definition(replace_a_transitions());
        let table = checked_transitions(&definition).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup("q0", "a"),
            Some(&Action {
                next_state: "q0".into(),
                write: "X".into(),
                direction: Direction::Right,
            })
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let mut definition = create_test_definition(replace_a_transitions());
        definition.blank_symbol = "B".into();
        definition.initial_state = "start".into();

        assert!(matches!(
            validate(&definition),
            Err(ValidationError::BlankNotInTapeAlphabet(_))
        ));
    }

    #[test]
    fn test_lint_clean_machine() {
        let machine = Machine::new(create_test_definition(replace_a_transitions())).unwrap();
        assert!(lint(&machine).is_empty());
    }

    #[test]
    fn test_lint_reports_findings() {
        let mut definition = create_test_definition(vec![
            TransitionDefinition::new("q0", "a", "q1", "Y", "R"),
            TransitionDefinition::new("q0", "_", "qf", "_", "R"),
        ]);
        definition.states.push("orphan".into());
        definition.alphabet.push("b".into());

        let machine = Machine::new(definition).unwrap();
        let warnings = lint(&machine);

        assert_eq!(
            warnings,
            vec![
                LintWarning::UnreachableStates(vec!["orphan".into()]),
                LintWarning::UndeclaredStates(vec!["q1".into()]),
                LintWarning::UndeclaredSymbols(vec!["Y".into()]),
                LintWarning::InputNotInTapeAlphabet(vec!["b".into()]),
            ]
        );
    }
}
