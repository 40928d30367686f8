//! A logically bi-infinite tape with O(1) amortized extension in both directions.
//!
//! Cells are stored in a `VecDeque` together with the signed position of the first
//! stored cell. Positions outside the stored range read as the blank symbol.

use crate::types::{Symbol, TuringMachineError};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    /// Position of `cells[0]`.
    origin: isize,
    blank: Symbol,
}

impl Tape {
    /// Creates an empty tape where every position reads as `blank`.
    pub fn new(blank: impl Into<Symbol>) -> Self {
        Self {
            cells: VecDeque::new(),
            origin: 0,
            blank: blank.into(),
        }
    }

    /// Creates a tape holding `symbols` at positions `0..len`.
    pub fn with_input<I>(blank: impl Into<Symbol>, symbols: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        Self {
            cells: symbols.into_iter().map(Into::into).collect(),
            origin: 0,
            blank: blank.into(),
        }
    }

    /// Returns the symbol at `position`, or the blank if it was never materialized.
    pub fn read(&self, position: isize) -> &Symbol {
        self.index(position)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&self.blank)
    }

    /// Stores `symbol` at `position`, extending the stored range as needed.
    pub fn write(
        &mut self,
        position: isize,
        symbol: impl Into<Symbol>,
    ) -> Result<(), TuringMachineError> {
        let i = self.materialize(position)?;
        self.cells[i] = symbol.into();
        Ok(())
    }

    /// Ensures `position` is stored, filling any gap with blanks. Returns its index.
    ///
    /// The logical value of the cell is unchanged. Fails if the stored range would
    /// span more positions than an `isize` can count.
    pub fn materialize(&mut self, position: isize) -> Result<usize, TuringMachineError> {
        if self.cells.is_empty() {
            self.origin = position;
            self.cells.push_back(self.blank.clone());
            return Ok(0);
        }

        let right = self.origin + self.cells.len() as isize - 1;
        if position.max(right).checked_sub(position.min(self.origin)).is_none() {
            return Err(TuringMachineError::TapeOverflow(position));
        }

        while position < self.origin {
            self.cells.push_front(self.blank.clone());
            self.origin -= 1;
        }

        let offset = self
            .index(position)
            .ok_or(TuringMachineError::TapeOverflow(position))?;
        while offset >= self.cells.len() {
            self.cells.push_back(self.blank.clone());
        }

        Ok(offset)
    }

    /// Concatenates the stored range from the leftmost to the rightmost position.
    pub fn render(&self) -> String {
        self.cells.iter().map(String::as_str).collect()
    }

    /// Returns the leftmost and rightmost stored positions, if any.
    pub fn bounds(&self) -> Option<(isize, isize)> {
        if self.cells.is_empty() {
            None
        } else {
            Some((self.origin, self.origin + self.cells.len() as isize - 1))
        }
    }

    /// Iterates over `(position, symbol)` pairs of the stored range.
    pub fn cells(&self) -> impl Iterator<Item = (isize, &Symbol)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, symbol)| (self.origin + i as isize, symbol))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> &Symbol {
        &self.blank
    }

    fn index(&self, position: isize) -> Option<usize> {
        position
            .checked_sub(self.origin)
            .and_then(|offset| usize::try_from(offset).ok())
    }
}
