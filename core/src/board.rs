use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;

use crate::*;

/// The grid of cells with hazard placement and neighbor counts.
///
/// A board starts with every cell concealed and safe. Hazards are placed once,
/// either by [`Board::generate_hazards`] or [`Board::place_hazards`]; after
/// that `is_hazard` and `hazard_neighbors` never change.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    cells: Array2<Cell>,
    hazard_count: Option<CellCount>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid();
        Ok(Self {
            config,
            grid,
            cells: Array2::default([grid.height() as usize, grid.width() as usize]),
            hazard_count: None,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn cell_count(&self) -> CellCount {
        self.grid.cell_count()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if self.grid.contains(index) {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex {
                index,
                cells: self.cell_count(),
            })
        }
    }

    pub fn cell(&self, index: CellIndex) -> Result<Cell> {
        let index = self.validate_index(index)?;
        Ok(*self.at(index))
    }

    /// Cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_generated(&self) -> bool {
        self.hazard_count.is_some()
    }

    /// Number of hazards, known once they have been placed.
    pub fn hazard_count(&self) -> Option<CellCount> {
        self.hazard_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.cell_count() - self.hazard_count.unwrap_or(0)
    }

    /// True while at least one safe cell has not been revealed.
    pub fn is_clearable(&self) -> bool {
        self.revealed_count < self.safe_cell_count()
    }

    /// Places `floor(cells * density)` hazards uniformly at random, never on
    /// `seed_index`, then computes every neighbor count.
    pub fn generate_hazards<R: Rng>(
        &mut self,
        seed_index: CellIndex,
        rng: &mut R,
    ) -> Result<()> {
        let seed_index = self.validate_index(seed_index)?;
        self.check_not_generated()?;

        let hazard_count = self.config.hazard_count();
        let mut candidates: Vec<CellIndex> = (0..self.cell_count())
            .filter(|&index| index != seed_index)
            .collect();

        // Fisher-Yates
        for i in (1..candidates.len()).rev() {
            let j = rng.random_range(0..=i);
            candidates.swap(i, j);
        }
        candidates.truncate(hazard_count);

        log::debug!(
            "Generating {} hazards on a {}x{} board, first reveal at {}",
            hazard_count,
            self.grid.width(),
            self.grid.height(),
            seed_index
        );
        self.apply_hazards(&candidates);
        Ok(())
    }

    /// Places hazards at exactly the given indices. Duplicates are ignored.
    pub fn place_hazards(&mut self, indices: &[CellIndex]) -> Result<()> {
        for &index in indices {
            self.validate_index(index)?;
        }
        self.check_not_generated()?;

        self.apply_hazards(indices);
        Ok(())
    }

    fn apply_hazards(&mut self, indices: &[CellIndex]) {
        for &index in indices {
            self.at_mut(index).set_hazard();
        }

        for index in 0..self.cell_count() {
            let count = self.count_hazard_neighbors(index);
            self.at_mut(index).set_hazard_neighbors(count);
        }

        let count = self.cells.iter().filter(|cell| cell.is_hazard()).count();
        self.hazard_count = Some(count);
    }

    fn count_hazard_neighbors(&self, index: CellIndex) -> u8 {
        // at most eight neighbors
        self.grid
            .iter_neighbors(index)
            .filter(|&pos| self.at(pos).is_hazard())
            .count() as u8
    }

    /// Reveals `seed_index` and cascades through zero-count regions, to
    /// completion. Hazards must have been placed first.
    pub fn reveal_cascade(&mut self, seed_index: CellIndex) -> Result<RevealOutcome> {
        Ok(Cascade::new(self, seed_index)?.run(self))
    }

    /// Rotates a closed cell through flagged, questioned and back to concealed.
    pub fn cycle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        use Concealment::*;

        let index = self.validate_index(index)?;
        let current = self.at(index).concealment();
        let Some(next) = current.next_mark() else {
            return Ok(MarkOutcome::NoChange);
        };

        match (current, next) {
            (_, Flagged) => self.flagged_count += 1,
            (Flagged, _) => self.flagged_count -= 1,
            _ => {}
        }
        self.at_mut(index).set_concealment(next);
        Ok(MarkOutcome::Changed)
    }

    pub fn hazard_indices(&self) -> impl DoubleEndedIterator<Item = CellIndex> + '_ {
        (0..self.cell_count()).filter(|&index| self.at(index).is_hazard())
    }

    /// Shows a hazard cell as [`Concealment::RevealedHazard`]. Returns whether
    /// anything changed.
    pub fn expose_hazard(&mut self, index: CellIndex) -> Result<bool> {
        let index = self.validate_index(index)?;
        let cell = *self.at(index);
        if !cell.is_hazard() || cell.concealment() == Concealment::RevealedHazard {
            return Ok(false);
        }
        self.set_concealment(index, Concealment::RevealedHazard);
        Ok(true)
    }

    pub(crate) fn at(&self, index: CellIndex) -> &Cell {
        &self.cells[self.grid.coords(index)]
    }

    fn at_mut(&mut self, index: CellIndex) -> &mut Cell {
        let coords = self.grid.coords(index);
        &mut self.cells[coords]
    }

    /// Changes the state of an in-bounds cell, keeping the revealed and
    /// flagged counters in sync.
    pub(crate) fn set_concealment(&mut self, index: CellIndex, concealment: Concealment) {
        let cell = self.at_mut(index);
        let previous = cell.concealment();
        let hazard = cell.is_hazard();
        cell.set_concealment(concealment);

        if previous == Concealment::Flagged {
            self.flagged_count -= 1;
        }
        if concealment == Concealment::Revealed && !hazard && previous != Concealment::Revealed {
            self.revealed_count += 1;
        }
    }

    fn check_not_generated(&self) -> Result<()> {
        if self.is_generated() {
            Err(GameError::AlreadyGenerated)
        } else {
            Ok(())
        }
    }
}
