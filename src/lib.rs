//! This crate provides the core logic for a deterministic single-tape Turing
//! machine simulator, built for demonstrating classic computability
//! constructions: unary arithmetic and simple recognizers driven by
//! hand-authored transition tables. It includes the sparse bi-infinite tape,
//! the compiled transition table, the step-at-a-time execution engine, input
//! encoding helpers, and a catalog of embedded demonstration machines.

pub mod analyzer;
pub mod config;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the compiled configuration types from the config module.
pub use config::{Action, MachineConfig, TransitionTable};
/// Re-exports the `DefinitionLoader` struct from the loader module.
pub use loader::DefinitionLoader;
/// Re-exports the `Machine` engine from the machine module.
pub use machine::Machine;
/// Re-exports `MachineCatalog`, `MachineInfo`, and `MACHINES` from the programs module.
pub use programs::{MachineCatalog, MachineInfo, MACHINES};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the machine definition and execution types from the types module.
pub use types::{
    Direction, MachineDefinition, MachineError, Rule, Step, MAX_DEFINITION_SIZE,
};
