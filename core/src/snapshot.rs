use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer may know about a single cell.
///
/// Concealed hazards have no variant of their own, a hazard only shows once it
/// has been opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CellView {
    Concealed,
    Flagged,
    Questioned,
    Revealed { adjacent: u8 },
    Hazard,
}

impl CellView {
    pub fn from_cell(cell: &Cell) -> Self {
        match cell.concealment() {
            Concealment::Concealed => Self::Concealed,
            Concealment::Flagged => Self::Flagged,
            Concealment::Questioned => Self::Questioned,
            Concealment::Revealed => Self::Revealed {
                adjacent: cell.hazard_neighbors(),
            },
            Concealment::RevealedHazard => Self::Hazard,
        }
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Concealed | Self::Flagged | Self::Questioned)
    }
}

/// Read-only view of a session, indexed like the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: Coord,
    pub height: Coord,
    pub status: GameStatus,
    pub hazard_count: Option<CellCount>,
    pub flagged_count: CellCount,
    pub cells: Vec<CellView>,
}

impl Snapshot {
    pub fn new(board: &Board, status: GameStatus) -> Self {
        let grid = board.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            status,
            hazard_count: board.hazard_count(),
            flagged_count: board.flagged_count(),
            cells: board.cells().map(CellView::from_cell).collect(),
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<CellView> {
        self.cells.get(index).copied()
    }

    /// Cells grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }
}
