use alloc::collections::VecDeque;
use core::future::ready;
use hashbrown::HashSet;

use crate::*;

/// One dequeue of a [`Cascade`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A safe cell was opened.
    Revealed {
        index: CellIndex,
        hazard_neighbors: u8,
    },
    /// The cell was already open.
    Skipped(CellIndex),
    /// A hazard was opened, the rest of the worklist was dropped.
    HitHazard(CellIndex),
}

impl Step {
    pub const fn index(&self) -> CellIndex {
        match *self {
            Self::Revealed { index, .. }
            | Self::Skipped(index)
            | Self::HitHazard(index) => index,
        }
    }

    pub const fn outcome(&self) -> RevealOutcome {
        match self {
            Self::Revealed { .. } => RevealOutcome::Revealed,
            Self::Skipped(_) => RevealOutcome::NoChange,
            Self::HitHazard(_) => RevealOutcome::HitHazard,
        }
    }
}

/// Breadth-first reveal worklist.
///
/// Every index that was ever queued is remembered, so a cell is processed at
/// most once per cascade. Hazards are only opened when they are the seed.
#[derive(Clone, Debug)]
pub struct Cascade {
    worklist: VecDeque<CellIndex>,
    enqueued: HashSet<CellIndex>,
}

impl Cascade {
    /// Starts a cascade at `seed_index` on a board whose hazards are placed.
    pub fn new(board: &Board, seed_index: CellIndex) -> Result<Self> {
        let seed_index = board.validate_index(seed_index)?;
        if !board.is_generated() {
            return Err(GameError::NotGenerated);
        }

        let mut enqueued = HashSet::new();
        enqueued.insert(seed_index);
        Ok(Self {
            worklist: VecDeque::from([seed_index]),
            enqueued,
        })
    }

    pub fn is_done(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Indices waiting to be processed.
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    /// Processes the next queued cell, `None` once the worklist is empty.
    ///
    /// Stepping with a smaller board than the one the cascade started on ends
    /// it at the first index that board does not have.
    pub fn step(&mut self, board: &mut Board) -> Option<Step> {
        let index = self.worklist.pop_front()?;
        let Ok(cell) = board.cell(index) else {
            log::warn!("Cell {} is not on this board, dropping cascade", index);
            self.worklist.clear();
            return None;
        };

        if cell.concealment().is_revealed() {
            log::trace!("Skipping already revealed cell {}", index);
            return Some(Step::Skipped(index));
        }

        if cell.is_hazard() {
            log::trace!("Hazard opened at {}", index);
            board.set_concealment(index, Concealment::RevealedHazard);
            self.worklist.clear();
            return Some(Step::HitHazard(index));
        }

        board.set_concealment(index, Concealment::Revealed);
        let hazard_neighbors = cell.hazard_neighbors();
        log::trace!("Revealed {} with {} hazard neighbors", index, hazard_neighbors);

        if hazard_neighbors == 0 {
            for neighbor in board.grid().iter_neighbors(index) {
                let neighbor_cell = board.at(neighbor);
                if neighbor_cell.is_hazard() || neighbor_cell.concealment().is_revealed() {
                    continue;
                }
                if self.enqueued.insert(neighbor) {
                    self.worklist.push_back(neighbor);
                }
            }
        }

        Some(Step::Revealed {
            index,
            hazard_neighbors,
        })
    }

    /// Drains the worklist and reports the combined outcome, `Won` when no
    /// safe cell is left to reveal afterwards.
    pub fn run(mut self, board: &mut Board) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        while let Some(step) = self.step(board) {
            outcome = outcome | step.outcome();
        }
        settle(outcome, board)
    }
}

/// Promotes a finished, hazard-free cascade to `Won` when the board is clear.
pub(crate) fn settle(outcome: RevealOutcome, board: &Board) -> RevealOutcome {
    if outcome == RevealOutcome::Revealed && !board.is_clearable() {
        RevealOutcome::Won
    } else {
        outcome
    }
}

/// Source of the delay a paced cascade waits on between successive reveals.
///
/// Pacing only spaces reveals out in time, the cells revealed and their order
/// are the same as with [`NoPacing`].
pub trait Pacer {
    fn pause(&mut self) -> impl Future<Output = ()>;
}

/// Zero-delay pacing, every pause completes immediately.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self) -> impl Future<Output = ()> {
        ready(())
    }
}

impl<F, Fut> Pacer for F
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    fn pause(&mut self) -> impl Future<Output = ()> {
        self()
    }
}
