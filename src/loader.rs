//! This module provides the `MachineLoader` struct, responsible for loading machines
//! from files, strings, and directories, and for reading run input from files.

use crate::definition::MachineDefinition;
use crate::machine::Machine;
use crate::parser::parse;
use crate::types::{TuringMachineError, MAX_DEFINITION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The document formats a machine definition can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The JSON document (`.json`).
    Json,
    /// The compact text format (`.tm`).
    Text,
}

impl Format {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "tm" => Some(Format::Text),
            _ => None,
        }
    }
}

/// `MachineLoader` is a utility struct for loading machines.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads and validates a machine from `path`, choosing the format by extension.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is read, parsed, and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read, is too large,
    ///   or has an unknown extension.
    /// * Any parse or validation error of the content otherwise.
    pub fn load_machine(path: &Path) -> Result<Machine, TuringMachineError> {
        let format = Format::from_path(path).ok_or_else(|| {
            TuringMachineError::FileError(format!(
                "Unsupported definition format for {} (expected .json or .tm)",
                path.display()
            ))
        })?;

        let content = read_file(path)?;
        debug!(path = %path.display(), ?format, "loading machine");

        Self::load_machine_from_str(&content, format)
    }

    /// Parses and validates a machine from `content`.
    pub fn load_machine_from_str(
        content: &str,
        format: Format,
    ) -> Result<Machine, TuringMachineError> {
        if content.len() > MAX_DEFINITION_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Definition is {} bytes, the limit is {}",
                content.len(),
                MAX_DEFINITION_SIZE
            )));
        }

        let definition = match format {
            Format::Json => MachineDefinition::from_json(content)?,
            Format::Text => parse(content)?,
        };

        Ok(Machine::new(definition)?)
    }

    /// Loads every `.json` and `.tm` file in `directory`.
    ///
    /// Each element is either the loaded machine with its path, or the error for that
    /// file. Subdirectories and other files are skipped.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Machine), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || Format::from_path(&path).is_none() {
                    return None;
                }

                Some(Self::load_machine(&path).map(|machine| (path, machine)))
            })
            .collect();

        // Directory order is platform dependent.
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }

    /// Reads run input from `path`, trimming surrounding whitespace.
    pub fn read_input(path: &Path) -> Result<String, TuringMachineError> {
        Ok(read_file(path)?.trim().to_string())
    }
}

fn read_file(path: &Path) -> Result<String, TuringMachineError> {
    fs::read_to_string(path).map_err(|e| {
        TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}
