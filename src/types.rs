//! This module defines the core data structures and types shared across the simulator:
//! state and symbol labels, head directions, step outcomes, and error types.

use std::fmt;
use thiserror::Error;

use crate::Rule;

/// A state label. States are opaque strings drawn from the machine's declared set.
pub type State = String;
/// A symbol label. Symbols are opaque strings drawn from the machine's alphabets.
pub type Symbol = String;

/// The step ceiling used when the caller does not supply one.
pub const DEFAULT_MAX_STEPS: usize = 10000;
/// The maximum allowed size for a machine definition in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB

/// Represents the possible directions the tape head can move.
///
/// Definitions spell these as the tokens `"L"` and `"R"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Parses a direction token. Only `"L"` and `"R"` are valid.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Direction::Left),
            "R" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns the token used for this direction in definitions.
    pub fn as_token(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
        }
    }

    /// Returns the signed head offset for this direction.
    pub fn offset(&self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a transition and keeps running.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// Why a run stopped.
///
/// The reason is informational only. Acceptance is decided solely by whether the
/// halting state is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Halt {
    /// The machine entered a final state.
    Accepted,
    /// No transition is defined for the current state and symbol.
    NoTransition,
    /// The step ceiling was reached.
    StepLimit,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Accepted => f.write_str("reached a final state"),
            Halt::NoTransition => f.write_str("no transition defined"),
            Halt::StepLimit => f.write_str("step limit reached"),
        }
    }
}

/// Which alphabet a symbol was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    Input,
    Tape,
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Input => f.write_str("input alphabet"),
            Alphabet::Tape => f.write_str("tape alphabet"),
        }
    }
}

/// A structural invariant of a machine definition that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The blank symbol must be a member of the tape alphabet.
    #[error("Blank symbol '{0}' must be in tape alphabet")]
    BlankNotInTapeAlphabet(Symbol),
    /// The initial state must be a member of the declared states.
    #[error("Initial state '{0}' must be in states")]
    UnknownInitialState(State),
    /// Every final state must be a member of the declared states.
    #[error("Final state '{0}' must be in states")]
    UnknownFinalState(State),
    /// A transition uses a direction token other than `L` or `R`.
    #[error("Invalid direction '{token}' in transition ({state}, {symbol}), must be 'L' or 'R'")]
    InvalidDirection {
        state: State,
        symbol: Symbol,
        token: String,
    },
    /// Two transitions share the same `(state, symbol)` key.
    #[error("Duplicate transition for state '{state}' and symbol '{symbol}'")]
    DuplicateTransition { state: State, symbol: Symbol },
    /// A required field is absent from the definition.
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Represents the errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The machine definition violates a structural invariant.
    #[error("Machine validation error: {0}")]
    Validation(#[from] ValidationError),
    /// A symbol falls outside the alphabet it must belong to.
    #[error("Symbol '{symbol}' not in {alphabet}")]
    AlphabetViolation { symbol: Symbol, alphabet: Alphabet },
    /// A tape position lies too far from the stored range to be addressed.
    #[error("Tape position {0} is out of range")]
    TapeOverflow(isize),
    /// Indicates an error while parsing a text definition.
    #[error("Definition parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error while decoding a JSON definition.
    #[error("JSON definition error: {0}")]
    JsonError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::JsonError(error.to_string())
    }
}
