//! A catalog of built-in machines embedded in the binary.
//!
//! The definitions are validated once, on first access, and shared immutably after.

use crate::loader::{Format, MachineLoader};
use crate::machine::Machine;
use crate::types::TuringMachineError;
use tracing::error;

// Default embedded machines
const PROGRAM_TEXTS: [(&str, Format); 5] = [
    (include_str!("../machines/replace-a.json"), Format::Json),
    (include_str!("../machines/anbn.json"), Format::Json),
    (include_str!("../machines/binary-increment.tm"), Format::Text),
    (include_str!("../machines/even-ones.tm"), Format::Text),
    (include_str!("../machines/busy-beaver-3.tm"), Format::Text),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Machine> = PROGRAM_TEXTS
        .iter()
        .filter_map(|(text, format)| match MachineLoader::load_machine_from_str(text, *format) {
            Ok(machine) => Some(machine),
            Err(e) => {
                error!(error = %e, "failed to load built-in machine");
                None
            }
        })
        .collect();
}

/// Summary of a built-in machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

pub struct ProgramCatalog;

impl ProgramCatalog {
    /// Get the number of available machines
    pub fn len() -> usize {
        PROGRAMS.len()
    }

    pub fn is_empty() -> bool {
        PROGRAMS.is_empty()
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<&'static Machine, TuringMachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            TuringMachineError::FileError(format!("Program index {} out of range", index))
        })
    }

    /// Get a machine by its name (case-insensitive)
    pub fn get_by_name(name: &str) -> Result<&'static Machine, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|machine| machine.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| TuringMachineError::FileError(format!("Program '{}' not found", name)))
    }

    /// List all machine names
    pub fn names() -> Vec<&'static str> {
        PROGRAMS.iter().map(Machine::display_name).collect()
    }

    /// Get information about a machine by its index
    pub fn info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let machine = Self::get_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: machine.display_name().to_string(),
            initial_state: machine.initial_state().to_string(),
            state_count: machine.states().len(),
            transition_count: machine.transitions().len(),
        })
    }

    /// Search for machines whose name contains `query`
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, machine)| machine.display_name().to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}
