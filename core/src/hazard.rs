use core::time::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of advancing the hazard clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardOutcome {
    /// Nothing happened: the round is not active or the countdown is still running.
    Idle,
    /// The hazard jumped to a new cell (possibly the one it was already on).
    Relocated {
        from: Option<Coord2>,
        to: Coord2,
    },
    /// The hazard was within one cell of the player when the countdown expired.
    Caught(Coord2),
}

/// Owns the roaming apparition and its relocation clock.
///
/// The controller only ever reads the minefield; a catch is reported back as
/// [`HazardOutcome::Caught`] for the owner to turn into a loss.
#[derive(Clone, Debug)]
pub struct HazardController {
    cell: Option<Coord2>,
    countdown: Duration,
    interval: Duration,
    rng: SmallRng,
}

impl HazardController {
    pub fn new(interval: Duration, seed: u64) -> Self {
        Self {
            cell: None,
            countdown: interval,
            interval,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn cell(&self) -> Option<Coord2> {
        self.cell
    }

    /// Time left until the next relocation check.
    pub fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Puts the hazard on a specific cell without touching the countdown.
    pub fn place(&mut self, cell: Coord2) {
        log::trace!("Hazard placed at {:?}", cell);
        self.cell = Some(cell);
    }

    /// Removes the hazard from the board, returning where it was.
    pub fn clear(&mut self) -> Option<Coord2> {
        self.cell.take()
    }

    /// Removes the hazard and rewinds the countdown to a full interval.
    pub fn reset(&mut self) {
        self.cell = None;
        self.countdown = self.interval;
    }

    /// Chebyshev distance between the hazard and the player, `None` if either is off the board.
    pub fn distance_to(&self, player: Option<Coord2>) -> Option<Coord> {
        Some(chebyshev_distance(self.cell?, player?))
    }

    pub fn distance_to_player<G: MinefieldGenerator>(&self, field: &MinefieldEngine<G>) -> Option<Coord> {
        self.distance_to(field.player_cell())
    }

    /// Advances the clock by `delta`.
    ///
    /// The clock is frozen unless the round is active. When it runs out it is
    /// rewound to a full interval (any overshoot is dropped) and the hazard
    /// either catches an adjacent player or jumps to a uniformly random cell.
    pub fn tick<G: MinefieldGenerator>(
        &mut self,
        delta: Duration,
        field: &MinefieldEngine<G>,
    ) -> HazardOutcome {
        if !field.phase().is_active() || !field.is_generated() {
            return HazardOutcome::Idle;
        }

        self.countdown = self.countdown.saturating_sub(delta);
        if !self.countdown.is_zero() {
            return HazardOutcome::Idle;
        }
        self.countdown = self.interval;

        if let Some(cell) = self.cell {
            if matches!(self.distance_to_player(field), Some(distance) if distance <= 1) {
                log::debug!(
                    "Hazard at {:?} caught player at {:?}",
                    cell,
                    field.player_cell()
                );
                return HazardOutcome::Caught(cell);
            }
        }

        let (size_x, size_y) = field.size();
        let to = (
            self.rng.random_range(0..size_x),
            self.rng.random_range(0..size_y),
        );
        let from = self.cell.replace(to);
        log::trace!("Hazard relocated from {:?} to {:?}", from, to);

        HazardOutcome::Relocated { from, to }
    }
}
