//! This crate provides the core logic for a single-tape, deterministic Turing machine
//! simulator. It includes modules for loading and validating machine definitions,
//! the bi-infinite tape, the transition table, the execution engine, and a catalog of
//! built-in machines.

pub mod definition;
pub mod engine;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod transition;
pub mod types;
pub mod validator;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the raw definition types.
pub use definition::{MachineDefinition, TransitionDefinition};
/// Re-exports the execution engine types.
pub use engine::{Configuration, Execution, RunResult};
/// Re-exports the `MachineLoader` struct and `Format` enum from the loader module.
pub use loader::{Format, MachineLoader};
/// Re-exports the validated `Machine`.
pub use machine::Machine;
/// Re-exports the text format parsing functions.
pub use parser::{parse, parse_machine};
/// Re-exports the built-in machine catalog.
pub use programs::{ProgramCatalog, ProgramInfo, PROGRAMS};
pub use tape::Tape;
pub use transition::{Action, TransitionTable};
/// Re-exports the shared types from the types module.
pub use types::{
    Alphabet, Direction, Halt, State, Step, Symbol, TuringMachineError, ValidationError,
    DEFAULT_MAX_STEPS, MAX_DEFINITION_SIZE,
};
/// Re-exports the `validate` and `lint` functions from the validator module.
pub use validator::{lint, validate, LintWarning};
