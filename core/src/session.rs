use alloc::vec::Vec;
use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::cascade::settle;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game: one board, its status and the random source used to place
/// hazards on the first reveal.
///
/// Every command borrows the session mutably, so a reveal that is still
/// cascading (see [`Reveal`]) cannot be interleaved with another command.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    status: GameStatus,
    rng: SmallRng,
    triggered_hazard: Option<CellIndex>,
}

impl Session {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        log::debug!(
            "New {}x{} session, density {}, seed {}",
            config.width(),
            config.height(),
            config.density(),
            seed
        );
        Ok(Self {
            board: Board::new(config)?,
            status: GameStatus::InProgress,
            rng: SmallRng::seed_from_u64(seed),
            triggered_hazard: None,
        })
    }

    /// Session over a fixed hazard layout, skipping random generation.
    pub fn with_hazards(config: BoardConfig, hazards: &[CellIndex]) -> Result<Self> {
        let mut session = Self::new(config, 0)?;
        session.board.place_hazards(hazards)?;
        Ok(session)
    }

    /// Starts over on a fresh board with the same configuration.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        *self = Self::new(*self.board.config(), seed)?;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        self.board.config()
    }

    /// The hazard that ended the game, if it was lost.
    pub fn triggered_hazard(&self) -> Option<CellIndex> {
        self.triggered_hazard
    }

    /// Hazards minus flags placed, `None` before hazards exist. Negative when
    /// there are more flags than hazards.
    pub fn hazards_left(&self) -> Option<isize> {
        self.board
            .hazard_count()
            .map(|count| count as isize - self.board.flagged_count() as isize)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.board, self.status)
    }

    /// Starts revealing `index`, placing hazards first if this is the first
    /// reveal. The returned handle performs the cascade one cell at a time.
    pub fn begin_reveal(&mut self, index: CellIndex) -> Result<Reveal<'_>> {
        let index = self.board.validate_index(index)?;
        self.check_in_progress()?;

        if !self.board.is_generated() {
            self.board.generate_hazards(index, &mut self.rng)?;
        }

        log::debug!("Revealing {}", index);
        Reveal::new(self, index)
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        Ok(self.begin_reveal(index)?.run())
    }

    /// Like [`Session::reveal`], waiting on `pacer` between successive reveals
    /// so intermediate states can be shown.
    pub async fn reveal_paced<P: Pacer>(
        &mut self,
        index: CellIndex,
        pacer: &mut P,
    ) -> Result<RevealOutcome> {
        let mut reveal = self.begin_reveal(index)?;
        while let Some(step) = reveal.step() {
            if step.outcome().has_update() && !reveal.is_done() {
                pacer.pause().await;
            }
        }
        Ok(reveal.outcome())
    }

    pub fn flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let index = self.board.validate_index(index)?;
        self.check_in_progress()?;
        self.board.cycle_flag(index)
    }

    /// Opens every hazard after a loss, last index first. Returns how many
    /// cells changed.
    pub fn reveal_all_hazards(&mut self) -> Result<CellCount> {
        let mut exposed = 0;
        for index in self.unexposed_hazards()? {
            self.board.expose_hazard(index)?;
            exposed += 1;
        }
        log::debug!("Exposed {} remaining hazards", exposed);
        Ok(exposed)
    }

    /// Like [`Session::reveal_all_hazards`], waiting on `pacer` after each
    /// hazard.
    pub async fn reveal_all_hazards_paced<P: Pacer>(
        &mut self,
        pacer: &mut P,
    ) -> Result<CellCount> {
        let mut exposed = 0;
        for index in self.unexposed_hazards()? {
            self.board.expose_hazard(index)?;
            exposed += 1;
            pacer.pause().await;
        }
        log::debug!("Exposed {} remaining hazards", exposed);
        Ok(exposed)
    }

    fn unexposed_hazards(&self) -> Result<Vec<CellIndex>> {
        self.check_lost()?;
        Ok(self
            .board
            .hazard_indices()
            .rev()
            .filter(|&index| self.board.at(index).concealment() != Concealment::RevealedHazard)
            .collect())
    }

    fn lose(&mut self, index: CellIndex) {
        log::debug!("Hazard hit at {}, game lost", index);
        self.status = GameStatus::Lost;
        self.triggered_hazard = Some(index);
    }

    fn win(&mut self) {
        log::debug!("All safe cells revealed, game won");
        self.status = GameStatus::Won;
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_lost(&self) -> Result<()> {
        if self.status == GameStatus::Lost {
            Ok(())
        } else {
            Err(GameError::NotLost)
        }
    }
}

/// A reveal command in flight.
///
/// Each [`Reveal::step`] processes one cell of the cascade and updates the
/// session status as soon as it is decided. Dropping the handle early finishes
/// the cascade, so the resulting state never depends on how it was paced.
#[derive(Debug)]
pub struct Reveal<'a> {
    session: &'a mut Session,
    cascade: Cascade,
    outcome: RevealOutcome,
}

impl<'a> Reveal<'a> {
    fn new(session: &'a mut Session, index: CellIndex) -> Result<Self> {
        let cascade = Cascade::new(&session.board, index)?;
        Ok(Self {
            session,
            cascade,
            outcome: RevealOutcome::NoChange,
        })
    }

    pub fn step(&mut self) -> Option<Step> {
        let step = self.cascade.step(&mut self.session.board)?;
        self.outcome = self.outcome | step.outcome();

        if let Step::HitHazard(index) = step {
            self.session.lose(index);
        } else if self.cascade.is_done() {
            self.outcome = settle(self.outcome, &self.session.board);
            if self.outcome == RevealOutcome::Won {
                self.session.win();
            }
        }

        Some(step)
    }

    pub fn is_done(&self) -> bool {
        self.cascade.is_done()
    }

    /// Cells queued but not yet processed.
    pub fn pending(&self) -> usize {
        self.cascade.pending()
    }

    /// Outcome so far, final once [`Reveal::is_done`].
    pub fn outcome(&self) -> RevealOutcome {
        self.outcome
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    /// Intermediate state, for drawing a cascade while it progresses.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Finishes the cascade without pausing.
    pub fn run(mut self) -> RevealOutcome {
        while self.step().is_some() {}
        self.outcome
    }
}

impl Drop for Reveal<'_> {
    fn drop(&mut self) {
        while self.step().is_some() {}
    }
}
