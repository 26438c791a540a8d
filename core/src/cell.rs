use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
///
/// Valid transitions:
/// - Hidden -> Flagged
/// - Flagged -> Hidden
/// - Hidden -> Revealed
/// - Flagged -> Revealed, only for mines disclosed after a loss
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) state: CellState,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Mines among the up to 8 surrounding cells, never counting the cell itself.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    pub const fn is_hidden(self) -> bool {
        self.state.is_hidden()
    }

    pub const fn is_flagged(self) -> bool {
        self.state.is_flagged()
    }

    pub const fn is_revealed(self) -> bool {
        self.state.is_revealed()
    }
}
