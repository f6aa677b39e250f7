//! Compiled machine configurations. A [`MachineDefinition`] is checked and
//! its rule lists are compiled into a transition table exactly once; the
//! resulting [`MachineConfig`] is immutable and can be shared by any number
//! of engines.

use crate::analyzer::{analyze, AnalysisError};
use crate::types::{Direction, MachineDefinition, MachineError};
use std::collections::{HashMap, HashSet};

/// The action a transition rule performs when it fires: write a symbol, move
/// the head, enter the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The symbol written over the cell under the head.
    pub write: char,
    /// Which way the head moves.
    pub direction: Direction,
    /// The state the machine enters.
    pub next_state: String,
}

/// The transition function as a read-only `(state, symbol)` keyed table.
///
/// Built once from a definition's rule lists; a missing entry is the
/// machine's halting signal, reported as `None` rather than an error.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: HashMap<String, HashMap<char, Action>>,
}

impl TransitionTable {
    /// Compiles the definition's per-state rule lists into the lookup table.
    ///
    /// Two rules for the same `(state, read)` key make the transition
    /// function ambiguous and are rejected instead of letting one silently
    /// win.
    pub fn build(definition: &MachineDefinition) -> Result<Self, AnalysisError> {
        let mut entries: HashMap<String, HashMap<char, Action>> = HashMap::new();
        let mut duplicates = Vec::new();

        for (state, rules) in &definition.rules {
            let state_entries = entries.entry(state.clone()).or_default();

            for rule in rules {
                let action = Action {
                    write: rule.write,
                    direction: rule.direction,
                    next_state: rule.next_state.clone(),
                };

                if state_entries.insert(rule.read, action).is_some() {
                    duplicates.push(format!("({}, '{}')", state, rule.read));
                }
            }
        }

        if !duplicates.is_empty() {
            duplicates.sort();
            return Err(AnalysisError::StructuralError(format!(
                "Duplicate transition rules: {}",
                duplicates.join(", ")
            )));
        }

        Ok(Self { entries })
    }

    /// Returns the action for `(state, symbol)`, or `None` when no rule
    /// matches. `None` means the machine halts; it is not an error.
    pub fn lookup(&self, state: &str, symbol: char) -> Option<&Action> {
        self.entries.get(state)?.get(&symbol)
    }

    /// Number of states with at least one outgoing rule.
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of transition rules in the table.
    pub fn rule_count(&self) -> usize {
        self.entries.values().map(|entries| entries.len()).sum()
    }
}

/// A validated, compiled machine configuration.
///
/// Immutable after construction. Engines hold it behind an `Arc`, so one
/// configuration can drive any number of concurrent runs without locking.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    name: String,
    blank: char,
    initial_state: String,
    accepting_states: HashSet<String>,
    table: TransitionTable,
}

impl MachineConfig {
    /// Validates `definition` and compiles its transition table.
    ///
    /// After this succeeds, every state and symbol the machine can ever
    /// reference is known to be declared, and the transition function is
    /// unambiguous.
    pub fn compile(definition: MachineDefinition) -> Result<Self, MachineError> {
        analyze(&definition)?;
        let table = TransitionTable::build(&definition)?;

        Ok(Self {
            name: definition.name,
            blank: definition.blank,
            initial_state: definition.initial_state,
            accepting_states: definition.accepting_states,
            table,
        })
    }

    /// The machine's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The blank symbol for tapes run under this configuration.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// The state every run starts in.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Whether halting in `state` means the input was accepted.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting_states.contains(state)
    }

    /// The compiled transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }
}
