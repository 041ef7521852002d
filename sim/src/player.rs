use haunted_core::{CellState, Coord2, Game, MinefieldGenerator, NeighborIter};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

/// Plays with the single-cell rules only: flag when a count is fully
/// explained by hidden neighbours, open when it is fully flagged, guess otherwise.
///
/// Reads true counts, so the hazard's distortion does not fool it.
#[derive(Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_move<G: MinefieldGenerator>(&mut self, game: &Game<G>) -> Option<Move> {
        let size = game.field().size();
        let cells = move || (0..size.0).flat_map(move |x| (0..size.1).map(move |y| (x, y)));

        for coords in cells() {
            let Some(CellState::Revealed(count)) = game.cell_at(coords) else {
                continue;
            };
            if count == 0 {
                continue;
            }

            let mut blocked = Vec::new();
            let mut flagged = 0;
            for pos in NeighborIter::new(coords, size) {
                match game.cell_at(pos) {
                    Some(CellState::Blocked) => blocked.push(pos),
                    Some(CellState::Flagged) => flagged += 1,
                    _ => {}
                }
            }

            if let Some(&pos) = blocked.first() {
                if usize::from(count) == blocked.len() + flagged {
                    return Some(Move::Flag(pos));
                }
                if usize::from(count) == flagged {
                    return Some(Move::Reveal(pos));
                }
            }
        }

        let candidates: Vec<Coord2> = cells()
            .filter(|&coords| game.cell_at(coords) == Some(CellState::Blocked))
            .collect();
        candidates.choose(&mut self.rng).copied().map(Move::Reveal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haunted_core::{GameConfig, PresetMinefieldGenerator};

    fn game(size: Coord2, mines: &[Coord2]) -> Game<PresetMinefieldGenerator> {
        let config = GameConfig::new(size, mines.len() as u16).with_safe_radius(1);
        let generator = PresetMinefieldGenerator::from_mine_coords(size, mines).unwrap();
        Game::with_generator(config, generator, 0).unwrap()
    }

    #[test]
    fn flags_forced_mine() {
        let mut game = game((3, 1), &[(2, 0)]);
        game.reveal((1, 0));
        // with (0, 0) open the count of 1 can only mean (2, 0)
        game.reveal((0, 0));

        assert_eq!(
            AutoPlayer::new(0).next_move(&game),
            Some(Move::Flag((2, 0)))
        );
    }

    #[test]
    fn opens_neighbours_of_satisfied_count() {
        let mut game = game((4, 1), &[(0, 0)]);
        game.reveal((1, 0));
        game.toggle_flag((0, 0));

        assert_eq!(
            AutoPlayer::new(0).next_move(&game),
            Some(Move::Reveal((2, 0)))
        );
    }

    #[test]
    fn guesses_on_untouched_board() {
        let game = game((4, 4), &[(3, 3)]);

        assert!(matches!(
            AutoPlayer::new(0).next_move(&game),
            Some(Move::Reveal(_))
        ));
    }
}
