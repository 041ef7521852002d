#![no_std]

extern crate alloc;

use core::ops::Index;
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use feedback::*;
pub use game::*;
pub use generator::*;
pub use hazard::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod feedback;
mod game;
mod generator;
mod hazard;
mod snapshot;
mod tile;
mod types;

/// Board and hazard parameters, fixed for the lifetime of a [`Game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Cells with `|dx| < safe_radius && |dy| < safe_radius` from the first click never hold a mine.
    pub safe_radius: Coord,
    pub hazard_interval_ms: u32,
}

impl GameConfig {
    pub const CLASSIC_SIZE: Coord2 = (24, 16);
    pub const CLASSIC_MINES: CellCount = 60;
    pub const CLASSIC_SAFE_RADIUS: Coord = 2;
    pub const CLASSIC_HAZARD_INTERVAL_MS: u32 = 2000;

    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self {
            width: size.0,
            height: size.1,
            mines,
            safe_radius: Self::CLASSIC_SAFE_RADIUS,
            hazard_interval_ms: Self::CLASSIC_HAZARD_INTERVAL_MS,
        }
    }

    pub const fn classic() -> Self {
        Self::new(Self::CLASSIC_SIZE, Self::CLASSIC_MINES)
    }

    pub const fn with_safe_radius(mut self, safe_radius: Coord) -> Self {
        self.safe_radius = safe_radius;
        self
    }

    pub const fn with_hazard_interval_ms(mut self, hazard_interval_ms: u32) -> Self {
        self.hazard_interval_ms = hazard_interval_ms;
        self
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn hazard_interval(&self) -> Duration {
        Duration::from_millis(self.hazard_interval_ms as u64)
    }

    /// Cells that can hold a mine no matter where the first click lands.
    ///
    /// The worst case is a click far enough from every edge that the whole
    /// `(2r - 1) x (2r - 1)` safe block fits on the board.
    pub fn min_placeable_cells(&self) -> CellCount {
        let side = (2 * CellCount::from(self.safe_radius)).saturating_sub(1);
        let block_x = side.min(CellCount::from(self.width));
        let block_y = side.min(CellCount::from(self.height));
        self.total_cells() - block_x * block_y
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.safe_radius == 0 {
            return Err(GameError::InvalidSafeRadius);
        }
        if self.hazard_interval_ms == 0 {
            return Err(GameError::InvalidInterval);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }

        let available = self.min_placeable_cells();
        if self.mines > available {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                available,
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Where the mines are for one round. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Out-of-range coordinates never hold a mine.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// The round was lost and the board has already been reset.
    HitMine,
    Won,
    /// First reveal attempt after a win; input is frozen from here on.
    PostWin,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
            PostWin => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_valid() {
        let config = GameConfig::classic();

        assert_eq!(config.size(), (24, 16));
        assert_eq!(config.mines, 60);
        assert_eq!(config.hazard_interval(), Duration::from_secs(2));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn placeable_cells_exclude_worst_case_safe_block() {
        assert_eq!(GameConfig::classic().min_placeable_cells(), 24 * 16 - 9);
        assert_eq!(
            GameConfig::new((4, 4), 1)
                .with_safe_radius(1)
                .min_placeable_cells(),
            15
        );
        // safe block wider than the board is clipped
        assert_eq!(
            GameConfig::new((2, 8), 1)
                .with_safe_radius(3)
                .min_placeable_cells(),
            16 - 2 * 5
        );
    }

    #[test]
    fn validate_rejects_unplaceable_mines() {
        let config = GameConfig::new((3, 3), 1);

        assert_eq!(
            config.validate(),
            Err(GameError::TooManyMines {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(config.with_safe_radius(1).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_degenerate_parameters() {
        assert_eq!(
            GameConfig::new((0, 4), 0).validate(),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            GameConfig::new((4, 4), 1).with_safe_radius(0).validate(),
            Err(GameError::InvalidSafeRadius)
        );
        assert_eq!(
            GameConfig::new((4, 4), 1)
                .with_hazard_interval_ms(0)
                .validate(),
            Err(GameError::InvalidInterval)
        );
        assert_eq!(
            GameConfig::new((4, 4), 0).with_safe_radius(1).validate(),
            Err(GameError::NoMines)
        );
    }

    #[test]
    fn layout_counts_adjacent_mines_clipped_to_bounds() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert!(!layout.contains_mine((7, 7)));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
