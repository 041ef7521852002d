use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniformly random placement that keeps a block around the first click free of mines.
///
/// Every eligible cell is collected up front and `mines` of them are drawn
/// without replacement, so generation always terminates.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, safe_cell: Coord2) -> Result<MineLayout> {
        let size = config.size();
        let (size_x, size_y) = size;

        let mut eligible: Vec<Coord2> = (0..size_x)
            .flat_map(|x| (0..size_y).map(move |y| (x, y)))
            .filter(|&coords| !within_safe_block(coords, safe_cell, config.safe_radius))
            .collect();

        let requested = usize::from(config.mines);
        if requested > eligible.len() {
            return Err(GameError::TooManyMines {
                requested: config.mines,
                available: eligible.len() as CellCount,
            });
        }

        log::debug!(
            "Placing {} mines among {} eligible cells, safe cell {:?}",
            requested,
            eligible.len(),
            safe_cell
        );

        let (mines, _) = eligible.partial_shuffle(&mut self.rng, requested);
        let layout = MineLayout::from_mine_coords(size, mines)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }

        Ok(layout)
    }
}
