//! The machine's storage: a conceptually bi-infinite tape of symbols,
//! addressed by signed position and sparsely backed by a map. Cells that were
//! never written read as the blank symbol, at any distance from the origin.

use std::collections::HashMap;

/// A sparse bi-infinite tape.
///
/// Only written cells are stored; every other position reads as the blank.
/// Reads never allocate or record anything, so reading an arbitrary position
/// is idempotent and two tapes with the same written cells are
/// observationally identical.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: HashMap<i64, char>,
    blank: char,
}

impl Tape {
    /// Creates an empty tape filled with `blank`.
    pub fn new(blank: char) -> Self {
        Self {
            cells: HashMap::new(),
            blank,
        }
    }

    /// Creates a tape pre-populated with the given `(position, symbol)` cells.
    pub fn with_content<I>(blank: char, content: I) -> Self
    where
        I: IntoIterator<Item = (i64, char)>,
    {
        Self {
            cells: content.into_iter().collect(),
            blank,
        }
    }

    /// Returns the symbol at `position`, or the blank if the cell was never
    /// written.
    pub fn get(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at `position`. The value persists for the tape's
    /// lifetime, including explicit writes of the blank.
    pub fn set(&mut self, position: i64, symbol: char) {
        self.cells.insert(position, symbol);
    }

    /// Returns the blank symbol this tape fills unwritten cells with.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Returns the symbols in `[center - radius, center + radius]`, blank
    /// cells included. A read-only view for display; the tape is unchanged.
    pub fn window(&self, center: i64, radius: usize) -> Vec<char> {
        let radius = radius as i64;
        (center - radius..=center + radius)
            .map(|position| self.get(position))
            .collect()
    }

    /// Returns every written cell currently holding a non-blank symbol,
    /// sorted by position. Cells overwritten with the blank are omitted.
    pub fn written(&self) -> Vec<(i64, char)> {
        let mut cells: Vec<(i64, char)> = self
            .cells
            .iter()
            .filter(|(_, &symbol)| symbol != self.blank)
            .map(|(&position, &symbol)| (position, symbol))
            .collect();
        cells.sort_unstable_by_key(|&(position, _)| position);
        cells
    }

    /// Counts the written cells currently holding `symbol`.
    pub fn symbol_count(&self, symbol: char) -> usize {
        self.cells.values().filter(|&&s| s == symbol).count()
    }
}
