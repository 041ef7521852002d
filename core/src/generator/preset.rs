use super::*;

/// Always hands out the same layout, ignoring the first click.
///
/// Used for replays and fixed scenarios. The layout's size and mine count must
/// match the config it is generated for.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    layout: MineLayout,
}

impl PresetMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, _safe_cell: Coord2) -> Result<MineLayout> {
        if self.layout.size() != config.size() || self.layout.mine_count() != config.mines {
            return Err(GameError::LayoutMismatch);
        }
        Ok(self.layout.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_layout_for_another_board() {
        let mut generator = PresetMinefieldGenerator::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let config = GameConfig::new((4, 4), 1).with_safe_radius(1);

        assert_eq!(
            generator.generate(&config, (0, 0)),
            Err(GameError::LayoutMismatch)
        );
    }

    #[test]
    fn rejects_layout_with_wrong_mine_count() {
        let mut generator =
            PresetMinefieldGenerator::from_mine_coords((4, 4), &[(1, 1), (2, 2)]).unwrap();
        let config = GameConfig::new((4, 4), 1).with_safe_radius(1);

        assert_eq!(
            generator.generate(&config, (0, 0)),
            Err(GameError::LayoutMismatch)
        );
    }
}
