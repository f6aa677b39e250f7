use crate::loader::DefinitionLoader;
use crate::types::{MachineDefinition, MachineError};

use std::sync::RwLock;

// Default embedded machine definitions
const DEFINITION_TEXTS: [&str; 8] = [
    include_str!("../machines/addition.json"),
    include_str!("../machines/subtraction.json"),
    include_str!("../machines/multiplication.json"),
    include_str!("../machines/division.json"),
    include_str!("../machines/square.json"),
    include_str!("../machines/palindrome.json"),
    include_str!("../machines/parity.json"),
    include_str!("../machines/even-odd.json"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<MachineDefinition>> = RwLock::new(Vec::new());
}

/// Access to the built-in machine catalog: the classic unary-arithmetic and
/// recognizer machines, embedded as data and loaded on first use.
pub struct MachineCatalog;

impl MachineCatalog {
    /// Parses and validates the embedded definitions into the catalog.
    pub fn load() -> Result<(), MachineError> {
        let mut definitions = Vec::new();

        for text in DEFINITION_TEXTS {
            definitions.push(DefinitionLoader::load_definition_from_str(text)?);
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = definitions;
        } else {
            return Err(MachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn count() -> usize {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine definition by its index
    pub fn definition_by_index(index: usize) -> Result<MachineDefinition, MachineError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine index {} out of range", index))
            })
    }

    /// Get a machine definition by its name
    pub fn definition_by_name(name: &str) -> Result<MachineDefinition, MachineError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|definition| definition.name == name)
            .cloned()
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine '{}' not found", name))
            })
    }

    /// List all machine names
    pub fn names() -> Vec<String> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .map(|definition| definition.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get summary information about a machine by its index
    pub fn info(index: usize) -> Result<MachineInfo, MachineError> {
        let definition = Self::definition_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: definition.name.clone(),
            initial_state: definition.initial_state.clone(),
            state_count: definition.states.len(),
            rule_count: definition.rule_count(),
        })
    }

    /// Search for machines by name
    pub fn search(query: &str) -> Vec<usize> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, definition)| {
                        definition
                            .name
                            .to_lowercase()
                            .contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }
}

/// Summary of one catalog entry.
#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub state_count: usize,
    pub rule_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder;
    use crate::machine::Machine;
    use crate::types::Step;

    /// Generous per-run budget; every catalog machine halts in far fewer
    /// steps on the inputs exercised here.
    const STEP_BUDGET: usize = 50_000;

    fn run(name: &str, word: &str) -> Machine {
        let definition = MachineCatalog::definition_by_name(name).unwrap();
        let mut machine = Machine::from_definition(definition).unwrap();
        machine.initialize(encoder::tape_content(word));

        for _ in 0..STEP_BUDGET {
            match machine.step().unwrap() {
                Step::Continue => {}
                Step::Halted => return machine,
            }
        }
        panic!("'{}' did not halt on {:?} within {} steps", name, word, STEP_BUDGET);
    }

    #[test]
    fn test_catalog_initialization() {
        let result = MachineCatalog::load();
        assert!(result.is_ok());

        assert_eq!(MachineCatalog::count(), 8);
    }

    #[test]
    fn test_all_embedded_definitions_are_valid() {
        // load() would already fail on an invalid definition; compile each
        // one to cover table building too.
        let count = MachineCatalog::count();
        for index in 0..count {
            let definition = MachineCatalog::definition_by_index(index).unwrap();
            let name = definition.name.clone();
            assert!(
                Machine::from_definition(definition).is_ok(),
                "Machine '{}' failed to compile",
                name
            );
        }
    }

    #[test]
    fn test_catalog_names() {
        let names = MachineCatalog::names();
        assert!(names.contains(&"Unary addition".to_string()));
        assert!(names.contains(&"Unary subtraction".to_string()));
        assert!(names.contains(&"Palindrome check".to_string()));
        assert!(names.contains(&"Even-odd check".to_string()));
    }

    #[test]
    fn test_catalog_lookup_by_index() {
        assert!(MachineCatalog::definition_by_index(0).is_ok());
        assert!(MachineCatalog::definition_by_index(999).is_err());
    }

    #[test]
    fn test_catalog_lookup_by_name() {
        let definition = MachineCatalog::definition_by_name("Unary addition");
        assert!(definition.is_ok());
        assert_eq!(definition.unwrap().initial_state, "A");

        assert!(MachineCatalog::definition_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_catalog_info() {
        let info = MachineCatalog::info(0).unwrap();
        assert_eq!(info.index, 0);
        assert_eq!(info.name, "Unary addition");
        assert!(info.state_count > 0);
        assert!(info.rule_count > 0);

        assert!(MachineCatalog::info(999).is_err());
    }

    #[test]
    fn test_catalog_search() {
        let results = MachineCatalog::search("unary");
        assert_eq!(results.len(), 5);

        let results = MachineCatalog::search("palindrome");
        assert_eq!(results.len(), 1);

        let results = MachineCatalog::search("nonexistent");
        assert!(results.is_empty());
    }

    #[test]
    fn test_addition_totals() {
        for a in 0..=3 {
            for b in 0..=3 {
                let machine = run("Unary addition", &encoder::addition(a, b));

                assert_eq!(machine.accepted_input(), Ok(true), "{}+{}", a, b);
                assert_eq!(
                    encoder::ones(machine.tape()),
                    (a + b) as usize,
                    "{}+{}",
                    a,
                    b
                );
                // Nothing but 1s may remain.
                assert!(machine
                    .tape()
                    .written()
                    .iter()
                    .all(|&(_, symbol)| symbol == '1'));
            }
        }
    }

    #[test]
    fn test_subtraction_differences() {
        for a in 0..=4u32 {
            for b in 0..=4u32 {
                let machine = run("Unary subtraction", &encoder::subtraction(a, b));

                assert_eq!(machine.accepted_input(), Ok(true), "{}-{}", a, b);
                assert_eq!(
                    encoder::ones(machine.tape()),
                    a.abs_diff(b) as usize,
                    "{}-{}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_subtraction_equal_operands_accepts() {
        let machine = run("Unary subtraction", &encoder::subtraction(3, 3));

        assert_eq!(machine.accepted_input(), Ok(true));
        assert_eq!(encoder::ones(machine.tape()), 0);
    }

    #[test]
    fn test_multiplication_products() {
        for (a, b) in [(1, 1), (2, 3), (3, 2), (1, 4)] {
            let machine = run("Unary multiplication", &encoder::multiplication(a, b));

            assert_eq!(machine.accepted_input(), Ok(true), "{}*{}", a, b);
            assert_eq!(encoder::ones(machine.tape()), (a * b) as usize, "{}*{}", a, b);
        }
    }

    #[test]
    fn test_division_quotients() {
        // larger operand divided by the smaller; remainders are discarded
        for (a, b, quotient) in [(6, 2, 3), (2, 6, 3), (7, 2, 3), (5, 5, 1), (1, 4, 4)] {
            let machine = run("Unary division", &encoder::division(a, b));

            assert_eq!(machine.accepted_input(), Ok(true), "{}/{}", a, b);
            assert_eq!(encoder::ones(machine.tape()), quotient, "{}/{}", a, b);
        }
    }

    #[test]
    fn test_square_results() {
        for n in 0..=3u32 {
            let machine = run("Unary square", &encoder::square(n));

            assert_eq!(machine.accepted_input(), Ok(true), "{}^2", n);
            assert_eq!(encoder::ones(machine.tape()), (n * n) as usize, "{}^2", n);
        }
    }

    #[test]
    fn test_palindrome_recognition() {
        let machine = run("Palindrome check", "1001");
        assert_eq!(machine.accepted_input(), Ok(true));

        let machine = run("Palindrome check", "1010");
        assert_eq!(machine.accepted_input(), Ok(false));

        for (word, palindrome) in [
            ("", true),
            ("1", true),
            ("0", true),
            ("11", true),
            ("10", false),
            ("0110", true),
            ("01100", false),
            ("10101", true),
        ] {
            let machine = run("Palindrome check", word);
            assert_eq!(machine.accepted_input(), Ok(palindrome), "{:?}", word);
        }
    }

    #[test]
    fn test_parity_recognition() {
        for (word, even_parity) in [
            ("", true),
            ("0", true),
            ("1", false),
            ("11", true),
            ("101", true),
            ("100", false),
            ("1111", true),
            ("01110", false),
        ] {
            let machine = run("Parity check", word);
            assert_eq!(machine.accepted_input(), Ok(even_parity), "{:?}", word);
        }
    }

    #[test]
    fn test_even_odd_recognition() {
        let machine = run("Even-odd check", &encoder::unary(0));
        assert_eq!(machine.accepted_input(), Ok(true));

        let machine = run("Even-odd check", &encoder::unary(1));
        assert_eq!(machine.accepted_input(), Ok(false));

        let machine = run("Even-odd check", &encoder::unary(4));
        assert_eq!(machine.accepted_input(), Ok(true));

        let machine = run("Even-odd check", &encoder::unary(7));
        assert_eq!(machine.accepted_input(), Ok(false));
    }
}
