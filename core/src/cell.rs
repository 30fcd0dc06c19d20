use serde::{Deserialize, Serialize};

/// Player-visible state of a cell. Exactly one applies at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Concealment {
    Concealed,
    Revealed,
    Flagged,
    Questioned,
    RevealedHazard,
}

impl Concealment {
    /// Whether the cell is still closed, marked or not.
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Concealed | Self::Flagged | Self::Questioned)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed | Self::RevealedHazard)
    }

    /// Next state of the flag cycle, `None` for revealed cells.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Concealed => Some(Self::Flagged),
            Self::Flagged => Some(Self::Questioned),
            Self::Questioned => Some(Self::Concealed),
            Self::Revealed | Self::RevealedHazard => None,
        }
    }
}

impl Default for Concealment {
    fn default() -> Self {
        Self::Concealed
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    concealment: Concealment,
    hazard: bool,
    hazard_neighbors: u8,
}

impl Cell {
    pub const fn concealment(&self) -> Concealment {
        self.concealment
    }

    pub const fn is_hazard(&self) -> bool {
        self.hazard
    }

    pub const fn hazard_neighbors(&self) -> u8 {
        self.hazard_neighbors
    }

    pub(crate) fn set_concealment(&mut self, concealment: Concealment) {
        self.concealment = concealment;
    }

    pub(crate) fn set_hazard(&mut self) {
        self.hazard = true;
    }

    pub(crate) fn set_hazard_neighbors(&mut self, count: u8) {
        self.hazard_neighbors = count;
    }
}
