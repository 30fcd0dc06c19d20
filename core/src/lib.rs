#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cascade::*;
pub use cell::*;
pub use error::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cascade;
mod cell;
mod error;
mod session;
mod snapshot;
mod types;

/// Construction parameters of a board: its size and the fraction of cells
/// that become hazards.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    width: Coord,
    height: Coord,
    density: f64,
}

impl BoardConfig {
    /// 9x9 with 10 hazards.
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 0.124);
    /// 16x16 with 40 hazards.
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 0.157);
    /// 30x16 with 99 hazards.
    pub const EXPERT: Self = Self::new_unchecked(30, 16, 0.2065);

    const fn new_unchecked(width: Coord, height: Coord, density: f64) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    pub fn new(width: Coord, height: Coord, density: f64) -> Result<Self> {
        let config = Self::new_unchecked(width, height, density);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::EmptyBoard);
        }
        // also rejects NaN
        if !(self.density > 0.0 && self.density < 1.0) {
            return Err(GameError::InvalidDensity(self.density));
        }
        Ok(())
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn density(&self) -> f64 {
        self.density
    }

    pub const fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub const fn cell_count(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// `floor(cells * density)`, never more than every cell but one since the
    /// first revealed cell is always safe.
    pub fn hazard_count(&self) -> CellCount {
        let cells = self.cell_count();
        // truncation is the floor for non-negative values
        let requested = (cells as f64 * self.density) as CellCount;
        let available = cells.saturating_sub(1);
        if requested > available {
            log::warn!(
                "Requested {} hazards but only {} cells are available, clamping",
                requested,
                available
            );
            available
        } else {
            requested
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitHazard,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard => true,
            Won => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitHazard, _) => HitHazard,
            (_, HitHazard) => HitHazard,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_hazard_counts() {
        assert_eq!(BoardConfig::BEGINNER.hazard_count(), 10);
        assert_eq!(BoardConfig::INTERMEDIATE.hazard_count(), 40);
        assert_eq!(BoardConfig::EXPERT.hazard_count(), 99);
        assert_eq!(BoardConfig::default(), BoardConfig::BEGINNER);
    }

    #[test]
    fn config_rejects_empty_boards() {
        assert_eq!(BoardConfig::new(0, 5, 0.2), Err(GameError::EmptyBoard));
        assert_eq!(BoardConfig::new(5, 0, 0.2), Err(GameError::EmptyBoard));
    }

    #[test]
    fn config_rejects_density_outside_open_interval() {
        for density in [0.0, 1.0, -0.1, 1.5] {
            assert_eq!(
                BoardConfig::new(3, 3, density),
                Err(GameError::InvalidDensity(density))
            );
        }
        assert!(matches!(
            BoardConfig::new(3, 3, f64::NAN),
            Err(GameError::InvalidDensity(_))
        ));
    }

    #[test]
    fn hazard_count_is_floored() {
        let config = BoardConfig::new(3, 3, 0.12).unwrap();
        assert_eq!(config.hazard_count(), 1);

        let config = BoardConfig::new(3, 3, 0.1).unwrap();
        assert_eq!(config.hazard_count(), 0);

        let config = BoardConfig::new(10, 10, 0.25).unwrap();
        assert_eq!(config.hazard_count(), 25);
    }

    #[test]
    fn hazard_count_leaves_room_for_the_first_reveal() {
        let config = BoardConfig::new(1, 1, 0.99).unwrap();
        assert_eq!(config.hazard_count(), 0);

        let config = BoardConfig::new(2, 2, 0.99).unwrap();
        assert_eq!(config.hazard_count(), 3);
    }

    #[test]
    fn reveal_outcomes_combine_by_severity() {
        use RevealOutcome::*;
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | HitHazard, HitHazard);
        assert_eq!(NoChange | NoChange, NoChange);
    }

    #[test]
    fn only_no_change_skips_redraw() {
        use RevealOutcome::*;
        assert!(!NoChange.has_update());
        assert!([Revealed, HitHazard, Won].iter().all(|outcome| outcome.has_update()));
    }
}
