use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Produces the mine layout for a round once the first clicked cell is known.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, safe_cell: Coord2) -> Result<MineLayout>;
}

/// Whether `coords` falls inside the mine-free block around `safe_cell`.
pub const fn within_safe_block(coords: Coord2, safe_cell: Coord2, safe_radius: Coord) -> bool {
    coords.0.abs_diff(safe_cell.0) < safe_radius && coords.1.abs_diff(safe_cell.1) < safe_radius
}
