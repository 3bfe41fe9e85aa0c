//! The driver-side collection of a grid's compiled circuits.

use crate::engine::Engine;
use indexmap::IndexMap;
use voxlogic_circuit::Circuit;
use voxlogic_core::{BlockPos, CompileError};
use voxlogic_grid::{Grid, GridError, WorldEdit};

/// Every circuit of one grid, rebuilt as a unit.
///
/// A failed [`rebuild`](Self::rebuild) leaves the previously installed
/// circuits in place, so a malformed edit never takes working logic down.
#[derive(Debug, Default)]
pub struct CircuitSet {
    circuits: Vec<Circuit>,
    index: IndexMap<BlockPos, usize>,
    generation: u64,
}

impl CircuitSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and compile every circuit in `grid`, replacing the current
    /// set only on success. Returns the number of circuits installed.
    ///
    /// # Errors
    ///
    /// The first compile failure; the previous set stays installed.
    pub fn rebuild(&mut self, engine: &Engine, grid: &dyn Grid) -> Result<usize, CompileError> {
        let circuits = engine.compile_all(grid)?;
        self.index = circuits
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.members().map(move |pos| (pos, i)))
            .collect();
        self.circuits = circuits;
        self.generation += 1;
        Ok(self.circuits.len())
    }

    /// Number of successful rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of installed circuits.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Whether no circuit is installed.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Installed circuits in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Circuit> {
        self.circuits.iter()
    }

    /// The circuit `pos` belongs to.
    pub fn circuit_at(&self, pos: BlockPos) -> Option<&Circuit> {
        self.index.get(&pos).and_then(|&i| self.circuits.get(i))
    }

    /// [`Circuit::refresh_local`] on every circuit, in order. Returns all
    /// applied edits.
    ///
    /// # Errors
    ///
    /// Stops at the first edit the grid rejects.
    pub fn refresh_all(&mut self, grid: &mut dyn Grid) -> Result<Vec<WorldEdit>, GridError> {
        let mut applied = Vec::new();
        for circuit in &mut self.circuits {
            applied.extend(circuit.refresh_local(grid)?);
        }
        Ok(applied)
    }

    /// [`Circuit::refresh_local`] on the circuit `pos` belongs to. `None`
    /// when `pos` is in no circuit.
    ///
    /// # Errors
    ///
    /// Stops at the first edit the grid rejects.
    pub fn refresh_at(
        &mut self,
        grid: &mut dyn Grid,
        pos: BlockPos,
    ) -> Result<Option<Vec<WorldEdit>>, GridError> {
        let Some(&i) = self.index.get(&pos) else {
            return Ok(None);
        };
        match self.circuits.get_mut(i) {
            Some(circuit) => circuit.refresh_local(grid).map(Some),
            None => Ok(None),
        }
    }
}
