use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Blocked,
    Flagged,
    Revealed(u8),
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Blocked | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}
