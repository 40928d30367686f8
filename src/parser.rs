//! This module provides the parser for the compact `.tm` definition format, utilizing
//! the `pest` crate. The grammar lives in `grammar.pest`; this module turns the parse
//! tree into a `MachineDefinition`.

use crate::{
    definition::{MachineDefinition, TransitionDefinition},
    machine::Machine,
    types::{TuringMachineError, ValidationError},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the definition grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

/// Sections every text definition must declare.
const REQUIRED_SECTIONS: [Rule; 5] = [
    Rule::states,
    Rule::tape_alphabet,
    Rule::blank_symbol,
    Rule::initial_state,
    Rule::transitions,
];

/// Parses a `.tm` document into an unvalidated `MachineDefinition`.
///
/// # Returns
///
/// * `Ok(MachineDefinition)` if the input is well-formed.
/// * `Err(TuringMachineError::ParseError)` on syntax errors or repeated sections.
/// * `Err(TuringMachineError::Validation)` if a required section is missing.
pub fn parse(input: &str) -> Result<MachineDefinition, TuringMachineError> {
    let program = DefinitionParser::parse(Rule::program, input.trim())
        .map_err(|e| TuringMachineError::ParseError(Box::new(e)))?;

    let mut definition = MachineDefinition::default();
    let mut seen = HashSet::new();

    // Rule: program > [section]
    for p in program.flat_map(|p| p.into_inner()) {
        let rule = p.as_rule();
        if rule == Rule::EOI {
            continue;
        }

        check_unique_rule(rule, p.as_span(), &mut seen)?;

        match rule {
            Rule::name => {
                definition.name = p.into_inner().next().map(|t| t.as_str().trim().to_string())
            }
            Rule::states => definition.states = parse_labels(p),
            Rule::alphabet => definition.alphabet = parse_labels(p),
            Rule::tape_alphabet => definition.tape_alphabet = parse_labels(p),
            Rule::blank_symbol => definition.blank_symbol = parse_inner_label(p),
            Rule::initial_state => definition.initial_state = parse_inner_label(p),
            Rule::final_states => definition.final_states = parse_labels(p),
            Rule::transitions => definition.transitions = parse_transitions(p)?,
            _ => {}
        }
    }

    if let Some(missing) = REQUIRED_SECTIONS.iter().find(|rule| !seen.contains(*rule)) {
        return Err(ValidationError::MissingField(format!("{missing:?}")).into());
    }

    Ok(definition)
}

/// Parses and validates a `.tm` document in one go.
pub fn parse_machine(input: &str) -> Result<Machine, TuringMachineError> {
    Ok(Machine::new(parse(input)?)?)
}

/// Parses the transition list from a `Pair<Rule::transitions>`.
fn parse_transitions(pair: Pair<Rule>) -> Result<Vec<TransitionDefinition>, TuringMachineError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect()
}

/// Parses `from, read -> to, write, direction`.
fn parse_transition(pair: Pair<Rule>) -> Result<TransitionDefinition, TuringMachineError> {
    let span = pair.as_span();
    let fields: Vec<String> = pair.into_inner().map(|p| parse_label(p.as_str())).collect();

    match fields.as_slice() {
        [from, read, to, write, direction] => Ok(TransitionDefinition::new(
            from.as_str(),
            read.as_str(),
            to.as_str(),
            write.as_str(),
            direction.as_str(),
        )),
        _ => Err(parse_error("Malformed transition", span)),
    }
}

/// Collects every label below a section, e.g. `states > labels > [label]`.
fn parse_labels(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .flat_map(|labels| labels.into_inner())
        .filter(|p| p.as_rule() == Rule::label)
        .map(|p| parse_label(p.as_str()))
        .collect()
}

/// Extracts the single label of a section such as `blank_symbol`.
fn parse_inner_label(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| parse_label(p.as_str()))
        .unwrap_or_default()
}

/// Strips the quotes of a `'quoted'` label.
fn parse_label(input: &str) -> String {
    input
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(input)
        .to_string()
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks that a section is declared at most once.
fn check_unique_rule(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), TuringMachineError> {
    if !seen.insert(rule) {
        return Err(parse_error(
            &format!("Duplicate \"{rule:?}:\" declaration"),
            span,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLACE_A: &str = r#"
name: Replace a with X
states: q0, qf
alphabet: a
tape_alphabet: a, X, _
blank_symbol: _
initial_state: q0
final_states: qf
transitions:
  q0, a -> q0, X, R
  q0, _ -> qf, _, R
"#;

    #[test]
    fn test_parse_definition() {
        let definition = parse(REPLACE_A).unwrap();

        assert_eq!(definition.name.as_deref(), Some("Replace a with X"));
        assert_eq!(definition.states, vec!["q0", "qf"]);
        assert_eq!(definition.alphabet, vec!["a"]);
        assert_eq!(definition.tape_alphabet, vec!["a", "X", "_"]);
        assert_eq!(definition.blank_symbol, "_");
        assert_eq!(definition.initial_state, "q0");
        assert_eq!(definition.final_states, vec!["qf"]);
        assert_eq!(
            definition.transitions,
            vec![
                TransitionDefinition::new("q0", "a", "q0", "X", "R"),
                TransitionDefinition::new("q0", "_", "qf", "_", "R"),
            ]
        );
    }

    #[test]
    fn test_parse_and_run() {
        let machine = parse_machine(REPLACE_A).unwrap();
        let result = machine.run_default("aa").unwrap();
        assert_eq!(result.tape, "XX_");
        assert!(result.accepted);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = r#"
# Accepts nothing, halts immediately.
states: q0   # only state

tape_alphabet: _
blank_symbol: _
initial_state: q0

transitions:
  # no moves
"#;
        let definition = parse(input).unwrap();
        assert_eq!(definition.name, None);
        assert_eq!(definition.states, vec!["q0"]);
        assert!(definition.alphabet.is_empty());
        assert!(definition.final_states.is_empty());
        assert!(definition.transitions.is_empty());
    }

    #[test]
    fn test_parse_quoted_labels() {
        let input = r#"
states: q0, 'final state'
alphabet: 1
tape_alphabet: 1, ' ', ','
blank_symbol: ' '
initial_state: q0
final_states: 'final state'
transitions:
  q0, 1 -> q0, ',', R
  q0, ' ' -> 'final state', ' ', L
"#;
        let definition = parse(input).unwrap();
        assert_eq!(definition.blank_symbol, " ");
        assert_eq!(definition.tape_alphabet, vec!["1", " ", ","]);
        assert_eq!(definition.transitions[1].to, "final state");

        let machine = Machine::new(definition).unwrap();
        let result = machine.run_default("11").unwrap();
        assert_eq!(result.tape, ",, ");
        assert!(result.accepted);
    }

    #[test]
    fn test_parse_missing_section() {
        let input = r#"
states: q0
tape_alphabet: _
initial_state: q0
transitions:
"#;
        let result = parse(input);
        assert_eq!(
            result,
            Err(TuringMachineError::Validation(ValidationError::MissingField(
                "blank_symbol".into()
            )))
        );
    }

    #[test]
    fn test_parse_duplicate_section() {
        let input = format!("{REPLACE_A}\nstates: q0");
        let error = parse(&input).unwrap_err();
        assert!(matches!(error, TuringMachineError::ParseError(_)));
        assert!(error.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_parse_syntax_error() {
        let input = r#"
states: q0
transitions:
  q0, a => q0, a, R
"#;
        assert!(matches!(parse(input), Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_invalid_direction_is_validation_error() {
        let input = REPLACE_A.replace("X, R", "X, S");
        let definition = parse(&input).unwrap();
        assert_eq!(definition.transitions[0].direction, "S");

        assert!(matches!(
            parse_machine(&input),
            Err(TuringMachineError::Validation(
                ValidationError::InvalidDirection { .. }
            ))
        ));
    }

    #[test]
    fn test_duplicate_transition_is_validation_error() {
        let input = format!("{}  q0, a -> qf, a, L\n", REPLACE_A.trim_start());
        assert!(matches!(
            parse_machine(&input),
            Err(TuringMachineError::Validation(
                ValidationError::DuplicateTransition { .. }
            ))
        ));
    }
}
