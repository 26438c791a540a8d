use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square minefield together with the player-visible state of every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a square mask of mine positions, computing every adjacency count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (size_x, size_y) = mine_mask.dim();
        if size_x != size_y {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = size_x.try_into().map_err(|_| GameError::InvalidSize)?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mine_count: CellCount = mine_count
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        GameConfig::new_unchecked(size, mine_count).validate()?;

        let mut cells = mine_mask.mapv(|mine| Cell {
            mine,
            ..Default::default()
        });
        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                let adjacent_mines = cells
                    .iter_neighbor_cells(coords)
                    .filter(|cell| cell.is_mine())
                    .count();
                // at most 8 neighbors
                cells[coords.to_nd_index()].adjacent_mines = adjacent_mines as u8;
            }
        }

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Side length, construction guarantees it fits a `Coord`.
    pub fn size(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Cells in row-major `(x, y)` order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    pub(crate) fn set_state(&mut self, coords: Coord2, state: CellState) {
        self.cells[coords.to_nd_index()].state = state;
    }

    pub(crate) fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_orthogonal(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn counts_mines_in_all_eight_directions() {
        let mines = &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)];
        let board = Board::from_mine_coords(3, mines).unwrap();

        assert_eq!(board.cell_at((1, 1)).adjacent_mines(), 8);
        assert!(!board.contains_mine((1, 1)));
        assert_eq!(board.mine_count(), 8);
    }

    #[test]
    fn mine_cell_count_excludes_itself() {
        let board = Board::from_mine_coords(2, &[(0, 0), (1, 1)]).unwrap();

        assert_eq!(board.cell_at((0, 0)).adjacent_mines(), 1);
        assert_eq!(board.cell_at((1, 0)).adjacent_mines(), 2);
    }

    #[test]
    fn new_board_is_fully_hidden() {
        let board = Board::from_mine_coords(4, &[(3, 3)]).unwrap();

        assert!(board.iter_cells().all(|(_, cell)| cell.is_hidden()));
        assert_eq!(board.flagged_count(), 0);
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn duplicate_coords_place_a_single_mine() {
        let board = Board::from_mine_coords(3, &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.iter_mines().collect::<Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn rejects_out_of_range_coords() {
        assert_eq!(
            Board::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_full_and_empty_boards() {
        assert_eq!(
            Board::from_mine_coords(1, &[(0, 0)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(Board::from_mine_coords(0, &[]), Err(GameError::InvalidSize));
    }

    #[test]
    fn rejects_non_square_mask() {
        let mask: Array2<bool> = Array2::default((2, 3));

        assert_eq!(
            Board::from_mine_mask(mask),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let board = Board::from_mine_coords(3, &[]).unwrap();

        assert_eq!(board.validate_coords((2, 2)), Ok((2, 2)));
        assert_eq!(board.validate_coords((0, 3)), Err(GameError::InvalidCoords));
    }
}
