//! Validation of machine definitions before execution. Every declared-set
//! invariant is checked here, so a definition that compiles can never
//! reference an unknown state or symbol at run time.

use crate::types::{MachineDefinition, MachineError};
use std::collections::HashSet;

/// Structural defects that can be found in a machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The definition is missing a fundamental part (no states, no alphabet).
    StructuralError(String),
    /// The initial state is not in the declared state set.
    UnknownInitialState(String),
    /// Accepting states that are not in the declared state set.
    UnknownAcceptingStates(Vec<String>),
    /// The blank symbol is not part of the declared alphabet.
    BlankOutsideAlphabet(char),
    /// Input-alphabet symbols that are not part of the declared alphabet.
    InputSymbolsOutsideAlphabet(Vec<char>),
    /// Rules keyed under states that are not in the declared state set.
    UnknownRuleStates(Vec<String>),
    /// Rules whose next state is not in the declared state set, as
    /// `state -> next` descriptions.
    UnknownNextStates(Vec<String>),
    /// Read or write symbols in rules that are not part of the alphabet.
    SymbolsOutsideAlphabet(Vec<char>),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::StructuralError(msg) => MachineError::ValidationError(msg),
            AnalysisError::UnknownInitialState(state) => MachineError::ValidationError(format!(
                "Initial state '{}' is not a declared state",
                state
            )),
            AnalysisError::UnknownAcceptingStates(states) => MachineError::ValidationError(
                format!("Accepting states not declared: {:?}", states),
            ),
            AnalysisError::BlankOutsideAlphabet(blank) => MachineError::ValidationError(format!(
                "Blank symbol '{}' is not in the alphabet",
                blank
            )),
            AnalysisError::InputSymbolsOutsideAlphabet(symbols) => MachineError::ValidationError(
                format!("Input symbols not in the alphabet: {:?}", symbols),
            ),
            AnalysisError::UnknownRuleStates(states) => MachineError::ValidationError(format!(
                "Rules defined for undeclared states: {:?}",
                states
            )),
            AnalysisError::UnknownNextStates(transitions) => MachineError::ValidationError(
                format!("Rules reference undeclared states: {:?}", transitions),
            ),
            AnalysisError::SymbolsOutsideAlphabet(symbols) => MachineError::ValidationError(
                format!("Rules use symbols outside the alphabet: {:?}", symbols),
            ),
        }
    }
}

/// Checks a machine definition against its own declared sets.
///
/// Runs every check and reports the first defect found. A definition that
/// passes satisfies: the initial state is declared, accepting states are a
/// subset of the states, the blank belongs to the alphabet, the input
/// alphabet is a subset of the alphabet, and every rule refers only to
/// declared states and symbols.
///
/// Declared-but-unused states or symbols are not defects; the declared sets
/// may legitimately be broader than the rules.
pub fn analyze(definition: &MachineDefinition) -> Result<(), MachineError> {
    let checks = [
        check_structure,
        check_initial_state,
        check_accepting_states,
        check_blank,
        check_input_alphabet,
        check_rule_states,
        check_rule_symbols,
    ];

    for check in checks {
        check(definition)?;
    }

    Ok(())
}

/// Checks that the declared state and symbol sets are non-empty.
fn check_structure(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if definition.states.is_empty() {
        return Err(AnalysisError::StructuralError(
            "No states declared".to_string(),
        ));
    }

    if definition.alphabet.is_empty() {
        return Err(AnalysisError::StructuralError(
            "No alphabet declared".to_string(),
        ));
    }

    Ok(())
}

/// Checks that the initial state belongs to the declared state set.
fn check_initial_state(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if !definition.states.contains(&definition.initial_state) {
        return Err(AnalysisError::UnknownInitialState(
            definition.initial_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that every accepting state belongs to the declared state set.
fn check_accepting_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown: Vec<String> = definition
        .accepting_states
        .difference(&definition.states)
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort(); // deterministic error output
        return Err(AnalysisError::UnknownAcceptingStates(unknown));
    }

    Ok(())
}

/// Checks that the blank symbol belongs to the alphabet.
fn check_blank(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if !definition.alphabet.contains(&definition.blank) {
        return Err(AnalysisError::BlankOutsideAlphabet(definition.blank));
    }

    Ok(())
}

/// Checks that the input alphabet is a subset of the alphabet.
fn check_input_alphabet(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown: Vec<char> = definition
        .input_alphabet
        .difference(&definition.alphabet)
        .copied()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        return Err(AnalysisError::InputSymbolsOutsideAlphabet(unknown));
    }

    Ok(())
}

/// Checks that rules are keyed by declared states and lead to declared
/// states.
fn check_rule_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown_sources: Vec<String> = definition
        .rules
        .keys()
        .filter(|state| !definition.states.contains(*state))
        .cloned()
        .collect();

    if !unknown_sources.is_empty() {
        unknown_sources.sort();
        return Err(AnalysisError::UnknownRuleStates(unknown_sources));
    }

    let mut unknown_targets = Vec::new();
    for (state, rules) in &definition.rules {
        for rule in rules {
            if !definition.states.contains(&rule.next_state) {
                unknown_targets.push(format!("{} -> {}", state, rule.next_state));
            }
        }
    }

    if !unknown_targets.is_empty() {
        unknown_targets.sort();
        return Err(AnalysisError::UnknownNextStates(unknown_targets));
    }

    Ok(())
}

/// Checks that every read and write symbol in the rules belongs to the
/// alphabet.
fn check_rule_symbols(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut unknown = HashSet::new();

    for rules in definition.rules.values() {
        for rule in rules {
            if !definition.alphabet.contains(&rule.read) {
                unknown.insert(rule.read);
            }
            if !definition.alphabet.contains(&rule.write) {
                unknown.insert(rule.write);
            }
        }
    }

    if !unknown.is_empty() {
        let mut unknown: Vec<char> = unknown.into_iter().collect();
        unknown.sort();
        return Err(AnalysisError::SymbolsOutsideAlphabet(unknown));
    }

    Ok(())
}
