//! The execution engine.
//!
//! An `Execution` borrows an immutable `Machine` and exclusively owns the mutable
//! `Configuration` of one run. It repeatedly looks up the transition for the current
//! state and the symbol under the head, writes, moves, and stops when the machine
//! reaches a final state, has no defined move, or exhausts the step ceiling.

use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::{Alphabet, Halt, State, Step, TuringMachineError};
use std::fmt;
use tracing::{debug, trace};

/// The mutable part of a run: current state, tape, head position, and step count.
#[derive(Debug, PartialEq, Eq)]
pub struct Configuration {
    state: State,
    tape: Tape,
    head: isize,
    steps: usize,
}

impl Configuration {
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn head(&self) -> isize {
        self.head
    }

    /// Number of transitions applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step: {}, State: {}, Tape: {}, Head: {}",
            self.steps,
            self.state,
            self.tape.render(),
            self.head
        )
    }
}

/// The outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// The rendered tape at the halting instant.
    pub tape: String,
    /// Whether the halting state is final.
    pub accepted: bool,
    pub halt: Halt,
    /// The halting state.
    pub state: State,
    pub head: isize,
    pub steps: usize,
}

/// A single run of a machine on one input.
#[derive(Debug)]
pub struct Execution<'m> {
    machine: &'m Machine,
    configuration: Configuration,
}

impl<'m> Execution<'m> {
    /// Prepares a run of `machine` on `input`, one symbol per character.
    ///
    /// Every input symbol must belong to the input alphabet; the first one that does
    /// not aborts with `AlphabetViolation` before any step is taken.
    pub fn new(machine: &'m Machine, input: &str) -> Result<Self, TuringMachineError> {
        let symbols: Vec<String> = input.chars().map(String::from).collect();

        if let Some(symbol) = symbols.iter().find(|s| !machine.alphabet().contains(*s)) {
            return Err(TuringMachineError::AlphabetViolation {
                symbol: symbol.clone(),
                alphabet: Alphabet::Input,
            });
        }

        debug!(
            machine = machine.display_name(),
            input_len = symbols.len(),
            "execution created"
        );

        Ok(Self {
            machine,
            configuration: Configuration {
                state: machine.initial_state().to_string(),
                tape: Tape::with_input(machine.blank(), symbols),
                head: 0,
                steps: 0,
            },
        })
    }

    /// Applies one transition.
    ///
    /// Returns `Halt::Accepted` without moving if the current state is final, and
    /// `Halt::NoTransition` if no move is defined. The step ceiling is not checked
    /// here; see [`Execution::run`].
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let machine = self.machine;
        let config = &mut self.configuration;

        if machine.is_final(&config.state) {
            return Ok(Step::Halt(Halt::Accepted));
        }

        // The head cell joins the rendered range once visited.
        config.tape.materialize(config.head)?;
        let symbol = config.tape.read(config.head);

        let Some(action) = machine.transitions().lookup(&config.state, symbol) else {
            trace!(state = %config.state, %symbol, head = config.head, "no transition");
            return Ok(Step::Halt(Halt::NoTransition));
        };

        if !machine.tape_alphabet().contains(&action.write) {
            return Err(TuringMachineError::AlphabetViolation {
                symbol: action.write.clone(),
                alphabet: Alphabet::Tape,
            });
        }

        trace!(
            step = config.steps,
            state = %config.state,
            %symbol,
            next = %action.next_state,
            write = %action.write,
            direction = %action.direction,
            "transition"
        );

        config.tape.write(config.head, action.write.as_str())?;
        config.head = config
            .head
            .checked_add(action.direction.offset())
            .ok_or(TuringMachineError::TapeOverflow(config.head))?;
        config.state.clone_from(&action.next_state);
        config.steps += 1;

        Ok(Step::Continue)
    }

    /// Runs until the machine halts or `max_steps` transitions have been applied.
    pub fn run(self, max_steps: usize) -> Result<RunResult, TuringMachineError> {
        self.run_with(max_steps, |_| {})
    }

    /// Like [`Execution::run`], calling `observe` after every applied transition.
    pub fn run_with<F>(
        mut self,
        max_steps: usize,
        mut observe: F,
    ) -> Result<RunResult, TuringMachineError>
    where
        F: FnMut(&Configuration),
    {
        let halt = loop {
            if self.machine.is_final(&self.configuration.state) {
                break Halt::Accepted;
            }
            if self.configuration.steps >= max_steps {
                break Halt::StepLimit;
            }

            match self.step()? {
                Step::Continue => observe(&self.configuration),
                Step::Halt(halt) => break halt,
            }
        };

        Ok(self.finish(halt))
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn machine(&self) -> &'m Machine {
        self.machine
    }

    fn finish(self, halt: Halt) -> RunResult {
        let Configuration {
            state,
            tape,
            head,
            steps,
        } = self.configuration;
        let accepted = self.machine.is_final(&state);

        debug!(
            machine = self.machine.display_name(),
            steps,
            %halt,
            accepted,
            "execution halted"
        );

        RunResult {
            tape: tape.render(),
            accepted,
            halt,
            state,
            head,
            steps,
        }
    }
}
