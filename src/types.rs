//! Core data structures shared across the simulator: machine definitions,
//! transition rules, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// The blank symbol assumed when a definition does not name one.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The maximum allowed size for a machine definition file in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB

/// A data-only description of a single-tape Turing machine.
///
/// A definition carries the declared state and symbol sets alongside the
/// transition rules; nothing in it is executable until it is compiled into a
/// [`MachineConfig`](crate::config::MachineConfig). Definitions round-trip
/// through JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineDefinition {
    /// Human-readable name of the machine.
    pub name: String,
    /// Every control state the machine may occupy.
    pub states: HashSet<String>,
    /// Every symbol that may appear on the tape, including the blank.
    pub alphabet: HashSet<char>,
    /// The symbol filling all never-written tape cells.
    #[serde(default = "default_blank")]
    pub blank: char,
    /// The subset of the alphabet valid in initial tape content.
    pub input_alphabet: HashSet<char>,
    /// The state the machine starts in.
    pub initial_state: String,
    /// States in which halting means the input is accepted.
    pub accepting_states: HashSet<String>,
    /// Transition rules, grouped by the state they fire from. Each state maps
    /// to the rules leaving it, at most one per read symbol.
    pub rules: HashMap<String, Vec<Rule>>,
}

fn default_blank() -> char {
    DEFAULT_BLANK_SYMBOL
}

impl MachineDefinition {
    /// Total number of transition rules across all states.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(|rules| rules.len()).sum()
    }
}

/// A single transition rule.
///
/// When the machine is in the owning state and reads `read` under the head,
/// it writes `write`, moves the head one cell in `direction`, and enters
/// `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The symbol that must be under the head for this rule to fire.
    pub read: char,
    /// The symbol written over the cell under the head.
    pub write: char,
    /// Which way the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

/// The possible head movements. The head always moves; there is no stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The signed position delta this direction applies to the head.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// The outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A rule fired; the machine keeps running.
    Continue,
    /// No rule matched the current state and symbol; the machine halted.
    Halted,
}

/// Errors surfaced by machine construction, loading, and the stepping
/// protocol.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The engine was asked to step or report acceptance before
    /// `initialize` was called.
    #[error("machine not initialized")]
    NotInitialized,
    /// `step` was called after the machine halted.
    #[error("cannot step a halted machine")]
    AlreadyHalted,
    /// `accepted_input` was called before the machine halted.
    #[error("machine still running")]
    StillRunning,
    /// A definition could not be deserialized.
    #[error("definition parse error: {0}")]
    ParseError(String),
    /// A definition violated a structural invariant.
    #[error("definition validation error: {0}")]
    ValidationError(String),
    /// A file system operation failed while loading definitions.
    #[error("file error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_rule_creation() {
        let rule = Rule {
            read: '1',
            write: 'x',
            direction: Direction::Right,
            next_state: "B".to_string(),
        };

        assert_eq!(rule.read, '1');
        assert_eq!(rule.write, 'x');
        assert_eq!(rule.direction, Direction::Right);
        assert_eq!(rule.next_state, "B");
    }

    #[test]
    fn test_definition_blank_defaults() {
        let json = r#"{
            "name": "Blankless",
            "states": ["A"],
            "alphabet": ["1", "_"],
            "input_alphabet": ["1"],
            "initial_state": "A",
            "accepting_states": [],
            "rules": {}
        }"#;

        let definition: MachineDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.blank, DEFAULT_BLANK_SYMBOL);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::ValidationError("initial state missing".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("validation error"));
        assert!(error_msg.contains("initial state missing"));

        assert_eq!(
            format!("{}", MachineError::AlreadyHalted),
            "cannot step a halted machine"
        );
        assert_eq!(
            format!("{}", MachineError::StillRunning),
            "machine still running"
        );
    }
}
