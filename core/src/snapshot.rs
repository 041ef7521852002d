use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub phase: RoundPhase,
    /// Cells as displayed, with the hazard's distortion applied.
    pub cells: Array2<CellState>,
    pub num_mines: CellCount,
    pub num_flags: CellCount,
    pub player: Option<Coord2>,
    pub hazard: Option<Coord2>,
    pub hazard_distance: Option<Coord>,
}

impl BoardSnapshot {
    pub fn from_game<G: MinefieldGenerator>(game: &Game<G>) -> Self {
        let size = game.field().size();
        let mut cells = Array2::default(size.to_nd_index());

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                if let Some(cell) = game.displayed_cell(coords) {
                    cells[coords.to_nd_index()] = cell;
                }
            }
        }

        Self {
            size,
            phase: game.phase(),
            cells,
            num_mines: game.num_mines(),
            num_flags: game.num_flags(),
            player: game.player_cell(),
            hazard: game.hazard_cell(),
            hazard_distance: game.distance_to_player(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }
}
