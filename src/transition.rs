//! The immutable transition table: a partial, deterministic mapping from
//! `(state, symbol)` to an `Action`.

use crate::types::{Direction, State, Symbol};
use std::collections::HashMap;

/// What the machine does for a matched `(state, symbol)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub next_state: State,
    pub write: Symbol,
    pub direction: Direction,
}

/// Transitions keyed by state, then by the symbol under the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rules: HashMap<State, HashMap<Symbol, Action>>,
    len: usize,
}

impl TransitionTable {
    /// Inserts an action for `(state, symbol)`.
    ///
    /// Returns the displaced action if the key was already present; the table is
    /// left holding the new one.
    pub(crate) fn insert(
        &mut self,
        state: State,
        symbol: Symbol,
        action: Action,
    ) -> Option<Action> {
        let previous = self.rules.entry(state).or_default().insert(symbol, action);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the action for `(state, symbol)`, or `None` when no move is defined.
    pub fn lookup(&self, state: &str, symbol: &str) -> Option<&Action> {
        self.rules.get(state).and_then(|by_symbol| by_symbol.get(symbol))
    }

    /// Returns true if `state` has at least one outgoing transition.
    pub fn has_transitions(&self, state: &str) -> bool {
        self.rules.get(state).is_some_and(|by_symbol| !by_symbol.is_empty())
    }

    /// Iterates over all `(state, symbol, action)` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&State, &Symbol, &Action)> + '_ {
        self.rules.iter().flat_map(|(state, by_symbol)| {
            by_symbol
                .iter()
                .map(move |(symbol, action)| (state, symbol, action))
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
