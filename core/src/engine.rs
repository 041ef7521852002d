use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one round.
///
/// Valid transitions:
/// - Unstarted -> Active (first reveal generates the minefield)
/// - Active -> Won
/// - Active -> Unstarted (loss resets the board)
/// - Won -> Acknowledged (next reveal attempt after the win)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Unstarted,
    Active,
    Won,
    /// The win has been acknowledged; all input is ignored until the next reset.
    Acknowledged,
}

impl RoundPhase {
    pub const fn is_unstarted(self) -> bool {
        matches!(self, Self::Unstarted)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Why a round was lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// The player revealed the mine at this cell.
    Mine(Coord2),
    /// The hazard at this cell caught the player on a relocation tick.
    Hazard(Coord2),
}

/// Grid state and the reveal/flag rules for one board.
#[derive(Clone, Debug)]
pub struct MinefieldEngine<G = RandomMinefieldGenerator> {
    config: GameConfig,
    generator: G,
    mine_layout: Option<MineLayout>,
    board: Array2<CellState>,
    blocked_count: CellCount,
    flagged_count: CellCount,
    phase: RoundPhase,
    player: Option<Coord2>,
    rounds_lost: u32,
}

impl<G: MinefieldGenerator> MinefieldEngine<G> {
    pub fn new(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            generator,
            mine_layout: None,
            board: Array2::default(config.size().to_nd_index()),
            blocked_count: config.total_cells(),
            flagged_count: 0,
            phase: RoundPhase::Unstarted,
            player: None,
            rounds_lost: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_generated(&self) -> bool {
        self.mine_layout.is_some()
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn num_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn num_flags(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag. Negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// The most recently revealed cell, `None` until the first safe reveal of a round.
    pub fn player_cell(&self) -> Option<Coord2> {
        self.player
    }

    pub fn blocked_count(&self) -> CellCount {
        self.blocked_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.config.total_cells() - self.blocked_count
    }

    pub fn rounds_lost(&self) -> u32 {
        self.rounds_lost
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        self.validate_coords(coords)
            .ok()
            .map(|coords| self.board[coords.to_nd_index()])
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Mines in the 8-neighbourhood, or `None` before generation or out of bounds.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        let coords = self.validate_coords(coords).ok()?;
        self.mine_layout
            .as_ref()
            .map(|layout| layout.adjacent_mine_count(coords))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Clears the mine layout and blocks every cell. Safe to call in any phase.
    pub fn reset(&mut self) {
        log::debug!("Resetting round, phase was {:?}", self.phase);

        self.mine_layout = None;
        self.board.fill(CellState::Blocked);
        self.blocked_count = self.config.total_cells();
        self.flagged_count = 0;
        self.phase = RoundPhase::Unstarted;
        self.player = None;
    }

    /// Places the round's mines around `safe_cell` and starts the round.
    ///
    /// Only has an effect on an unstarted round; a generated layout is never replaced.
    pub fn generate(&mut self, safe_cell: Coord2) -> Result<()> {
        let safe_cell = self.validate_coords(safe_cell)?;

        if !self.phase.is_unstarted() {
            log::debug!("Ignoring generate in phase {:?}", self.phase);
            return Ok(());
        }

        let layout = self.generator.generate(&self.config, safe_cell)?;
        if layout.size() != self.size() {
            return Err(GameError::LayoutMismatch);
        }

        log::debug!(
            "Generated minefield with {} mines from safe cell {:?}",
            layout.mine_count(),
            safe_cell
        );
        self.mine_layout = Some(layout);
        self.phase = RoundPhase::Active;
        Ok(())
    }

    /// Reveals a cell, silently ignoring out-of-range coordinates.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        match self.try_reveal(coords) {
            Ok(outcome) => outcome,
            Err(GameError::InvalidCoords) => RevealOutcome::NoChange,
            Err(err) => {
                log::warn!("Reveal at {:?} failed: {}", coords, err);
                RevealOutcome::NoChange
            }
        }
    }

    pub fn try_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;

        if matches!(self.phase, RoundPhase::Acknowledged)
            || self.board[coords.to_nd_index()] != CellState::Blocked
        {
            return Ok(NoChange);
        }

        match self.phase {
            RoundPhase::Won => {
                log::debug!("Win acknowledged by reveal at {:?}", coords);
                self.phase = RoundPhase::Acknowledged;
                return Ok(PostWin);
            }
            RoundPhase::Unstarted => self.generate(coords)?,
            RoundPhase::Active | RoundPhase::Acknowledged => {}
        }

        if self.has_mine_at(coords) {
            self.lose(LossCause::Mine(coords));
            return Ok(HitMine);
        }

        self.player = Some(coords);
        self.flood_reveal(coords);

        let mines = self
            .mine_layout
            .as_ref()
            .map_or(self.config.mines, MineLayout::mine_count);
        if self.blocked_count == mines {
            log::debug!("Round won, last reveal at {:?}", coords);
            self.phase = RoundPhase::Won;
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Breadth-first reveal from `start`, spreading through zero-count cells.
    ///
    /// Flags in the way are removed. Each newly revealed cell decrements the
    /// blocked counter exactly once.
    fn flood_reveal(&mut self, start: Coord2) {
        let Some(layout) = self.mine_layout.as_ref() else {
            return;
        };

        let mut to_visit = VecDeque::from([start]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let index = visit_coords.to_nd_index();
            match self.board[index] {
                CellState::Revealed(_) => continue,
                CellState::Flagged => self.flagged_count -= 1,
                CellState::Blocked => {}
            }

            let count = layout.adjacent_mine_count(visit_coords);
            self.board[index] = CellState::Revealed(count);
            self.blocked_count -= 1;
            log::trace!("Revealed cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                let board = &self.board;
                to_visit.extend(
                    layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| board[pos.to_nd_index()].is_unrevealed()),
                );
            }
        }
    }

    /// Ends the round as lost and resets the board for the next one.
    pub fn lose(&mut self, cause: LossCause) {
        log::debug!("Round lost: {:?}", cause);
        self.rounds_lost += 1;
        self.reset();
    }

    /// Flips a blocked cell to flagged and back, silently ignoring out-of-range coordinates.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.try_toggle_flag(coords)
            .unwrap_or(MarkOutcome::NoChange)
    }

    pub fn try_toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        if matches!(self.phase, RoundPhase::Acknowledged) {
            return Ok(NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            CellState::Blocked => {
                *cell = CellState::Flagged;
                self.flagged_count += 1;
                Changed
            }
            CellState::Flagged => {
                *cell = CellState::Blocked;
                self.flagged_count -= 1;
                Changed
            }
            CellState::Revealed(_) => NoChange,
        })
    }
}
