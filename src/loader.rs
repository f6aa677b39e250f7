//! Loading machine definitions from JSON files and strings.

use crate::analyzer::analyze;
use crate::types::{MachineDefinition, MachineError, MAX_DEFINITION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// `DefinitionLoader` reads machine definitions from individual `.json`
/// files, from string content, or from every `.json` file in a directory.
/// Every loaded definition is validated before it is returned.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a single machine definition from the given file path.
    ///
    /// # Errors
    ///
    /// * [`MachineError::FileError`] if the file cannot be read or exceeds
    ///   [`MAX_DEFINITION_SIZE`].
    /// * [`MachineError::ParseError`] if the content is not a valid
    ///   definition document.
    /// * [`MachineError::ValidationError`] if the definition violates a
    ///   structural invariant.
    pub fn load_definition(path: &Path) -> Result<MachineDefinition, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if content.len() > MAX_DEFINITION_SIZE {
            return Err(MachineError::FileError(format!(
                "Definition file {} exceeds {} bytes",
                path.display(),
                MAX_DEFINITION_SIZE
            )));
        }

        Self::load_definition_from_str(&content)
    }

    /// Loads a machine definition from JSON string content.
    ///
    /// Useful for definitions that are not stored in files, e.g. embedded
    /// documents or editor buffers.
    pub fn load_definition_from_str(content: &str) -> Result<MachineDefinition, MachineError> {
        let definition: MachineDefinition =
            serde_json::from_str(content).map_err(|e| MachineError::ParseError(e.to_string()))?;

        analyze(&definition)?;

        Ok(definition)
    }

    /// Loads every `.json` definition in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each entry
    /// yields its own `Result`, so one malformed file does not hide the
    /// rest.
    pub fn load_definitions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.json files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_definition(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => Some(Err(MachineError::FileError(format!(
                        "Failed to load definition from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
