//! The execution engine: one `Machine` drives one run of a compiled
//! configuration over a sparse tape. The engine owns the head position,
//! current state, and tape for its run; stepping is the only mutation, and
//! the caller owns the decision to keep stepping.

use crate::config::MachineConfig;
use crate::tape::Tape;
use crate::types::{MachineError, Step};
use std::sync::Arc;

/// The engine's own lifecycle, distinct from the simulated machine's states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Constructed but not yet given tape content.
    Uninitialized,
    /// Between `initialize` and the step that finds no rule.
    Running,
    /// No rule matched; terminal for this run.
    Halted,
}

/// A single run of a Turing machine.
///
/// Construct it from a shared [`MachineConfig`], call
/// [`initialize`](Machine::initialize) with the initial tape content, then
/// call [`step`](Machine::step) until it reports [`Step::Halted`] and read
/// the verdict with [`accepted_input`](Machine::accepted_input).
///
/// The engine never loops internally and never bounds the step count;
/// whether to keep stepping a machine that shows no sign of halting is
/// entirely the caller's decision.
pub struct Machine {
    config: Arc<MachineConfig>,
    tape: Tape,
    head: i64,
    state: String,
    phase: Phase,
    step_count: usize,
}

impl Machine {
    /// Creates an uninitialized engine for `config`.
    ///
    /// The configuration is shared, not copied; any number of engines may
    /// run the same configuration concurrently.
    pub fn new(config: Arc<MachineConfig>) -> Self {
        let tape = Tape::new(config.blank());
        let state = config.initial_state().to_string();

        Self {
            config,
            tape,
            head: 0,
            state,
            phase: Phase::Uninitialized,
            step_count: 0,
        }
    }

    /// Compiles `definition` and creates an engine for it in one call.
    pub fn from_definition(
        definition: crate::types::MachineDefinition,
    ) -> Result<Self, MachineError> {
        let config = Arc::new(MachineConfig::compile(definition)?);
        Ok(Self::new(config))
    }

    /// Starts a run: head at 0, current state set to the configuration's
    /// initial state, tape holding exactly `content` (every other cell reads
    /// blank).
    ///
    /// Calling this on a running or halted engine discards that run and
    /// starts a fresh one.
    pub fn initialize<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = (i64, char)>,
    {
        self.tape = Tape::with_content(self.config.blank(), content);
        self.head = 0;
        self.state = self.config.initial_state().to_string();
        self.phase = Phase::Running;
        self.step_count = 0;
    }

    /// Executes one step.
    ///
    /// If the table has a rule for the current state and the symbol under
    /// the head, the rule's symbol is written, the machine enters the rule's
    /// next state, the head moves one cell, and `Step::Continue` is
    /// returned. If no rule matches, the machine halts and `Step::Halted` is
    /// returned; nothing else is mutated. The lookup miss is the normal end
    /// of a run, not an error.
    ///
    /// # Errors
    ///
    /// * [`MachineError::NotInitialized`] before `initialize` was called.
    /// * [`MachineError::AlreadyHalted`] once the machine has halted;
    ///   halting is terminal and a run cannot be resumed.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        match self.phase {
            Phase::Uninitialized => return Err(MachineError::NotInitialized),
            Phase::Halted => return Err(MachineError::AlreadyHalted),
            Phase::Running => {}
        }

        let symbol = self.tape.get(self.head);
        match self.config.table().lookup(&self.state, symbol) {
            Some(action) => {
                self.tape.set(self.head, action.write);
                self.state = action.next_state.clone();
                self.head += action.direction.offset();
                self.step_count += 1;
                Ok(Step::Continue)
            }
            None => {
                self.phase = Phase::Halted;
                Ok(Step::Halted)
            }
        }
    }

    /// Whether the halted machine accepted its input, i.e. halted in one of
    /// the configuration's accepting states.
    ///
    /// # Errors
    ///
    /// * [`MachineError::NotInitialized`] before `initialize` was called.
    /// * [`MachineError::StillRunning`] while the machine has not halted.
    pub fn accepted_input(&self) -> Result<bool, MachineError> {
        match self.phase {
            Phase::Uninitialized => Err(MachineError::NotInitialized),
            Phase::Running => Err(MachineError::StillRunning),
            Phase::Halted => Ok(self.config.is_accepting(&self.state)),
        }
    }

    /// The simulated machine's current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Whether the machine has halted.
    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    /// Whether the machine is between `initialize` and halting.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Number of steps executed in the current run.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Read access to the run's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The configuration this engine runs.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The symbols in a window of `radius` cells either side of the head.
    /// For display; reading does not change the tape.
    pub fn tape_window(&self, radius: usize) -> Vec<char> {
        self.tape.window(self.head, radius)
    }
}
