use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications for presentation collaborators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Win,
    /// Fired after the round has already been reset.
    Lose(LossCause),
    /// The player acknowledged the win with one more reveal attempt.
    PostWin { hazard_at_win: Option<Coord2> },
}

pub type Listener = Box<dyn FnMut(&GameEvent)>;

const HAZARD_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One board plus its apparition, driven by a host loop.
///
/// The host feeds clicks through [`Game::reveal`] and [`Game::toggle_flag`],
/// advances time with [`Game::tick`], and reads notifications either through
/// subscribed listeners or by draining [`Game::drain_events`] once per step.
pub struct Game<G = RandomMinefieldGenerator> {
    field: MinefieldEngine<G>,
    hazard: HazardController,
    hazard_at_win: Option<Coord2>,
    events: VecDeque<GameEvent>,
    listeners: Vec<Listener>,
}

impl Game<RandomMinefieldGenerator> {
    /// Random minefields and hazard moves, both derived from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(
            config,
            RandomMinefieldGenerator::new(seed),
            seed ^ HAZARD_SEED_SALT,
        )
    }
}

impl<G: MinefieldGenerator> Game<G> {
    pub fn with_generator(config: GameConfig, generator: G, hazard_seed: u64) -> Result<Self> {
        let field = MinefieldEngine::new(config, generator)?;
        let hazard = HazardController::new(config.hazard_interval(), hazard_seed);

        Ok(Self {
            field,
            hazard,
            hazard_at_win: None,
            events: VecDeque::new(),
            listeners: Vec::new(),
        })
    }

    pub fn field(&self) -> &MinefieldEngine<G> {
        &self.field
    }

    pub fn hazard(&self) -> &HazardController {
        &self.hazard
    }

    pub fn config(&self) -> &GameConfig {
        self.field.config()
    }

    pub fn phase(&self) -> RoundPhase {
        self.field.phase()
    }

    pub fn num_mines(&self) -> CellCount {
        self.field.num_mines()
    }

    pub fn num_flags(&self) -> CellCount {
        self.field.num_flags()
    }

    pub fn mines_left(&self) -> isize {
        self.field.mines_left()
    }

    pub fn player_cell(&self) -> Option<Coord2> {
        self.field.player_cell()
    }

    pub fn hazard_cell(&self) -> Option<Coord2> {
        self.hazard.cell()
    }

    pub fn distance_to_player(&self) -> Option<Coord> {
        self.hazard.distance_to_player(&self.field)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        self.field.cell_at(coords)
    }

    /// The cell as the player sees it: revealed counts next to the hazard are inflated.
    pub fn displayed_cell(&self, coords: Coord2) -> Option<CellState> {
        let cell = self.field.cell_at(coords)?;
        Some(match (cell, self.hazard.cell()) {
            (CellState::Revealed(count), Some(hazard))
                if chebyshev_distance(coords, hazard) == 1 =>
            {
                CellState::Revealed(haunted_count(count))
            }
            _ => cell,
        })
    }

    /// Puts the hazard on `cell`, e.g. to restore a saved position.
    pub fn place_hazard(&mut self, cell: Coord2) -> Result<()> {
        let cell = self.field.validate_coords(cell)?;
        self.hazard.place(cell);
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Pending notifications, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.field.reveal(coords);

        match outcome {
            RevealOutcome::HitMine => {
                self.hazard.reset();
                self.emit(GameEvent::Lose(LossCause::Mine(coords)));
            }
            RevealOutcome::Won => {
                self.hazard_at_win = self.hazard.clear();
                self.emit(GameEvent::Win);
            }
            RevealOutcome::PostWin => {
                self.emit(GameEvent::PostWin {
                    hazard_at_win: self.hazard_at_win,
                });
            }
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }

        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.field.toggle_flag(coords)
    }

    pub fn tick(&mut self, delta: Duration) -> HazardOutcome {
        let outcome = self.hazard.tick(delta, &self.field);

        if let HazardOutcome::Caught(cell) = outcome {
            let cause = LossCause::Hazard(cell);
            self.field.lose(cause);
            self.hazard.reset();
            self.emit(GameEvent::Lose(cause));
        }

        outcome
    }

    /// Starts over with a fresh, ungenerated board.
    pub fn reset(&mut self) {
        self.field.reset();
        self.hazard.reset();
        self.hazard_at_win = None;
    }

    fn emit(&mut self, event: GameEvent) {
        log::debug!("Emitting {:?}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.events.push_back(event);
    }
}

impl<G: fmt::Debug> fmt::Debug for Game<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("field", &self.field)
            .field("hazard", &self.hazard)
            .field("hazard_at_win", &self.hazard_at_win)
            .field("events", &self.events)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
