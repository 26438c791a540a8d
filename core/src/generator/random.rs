use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Seeded generation strategy, the same seed and config always produce the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate(config, &mut rng)
    }
}

/// Places `config.mines` mines uniformly at random by rejection sampling.
///
/// Sampling a coordinate that already holds a mine is retried, so positions never repeat. The
/// caller supplies the random source.
pub fn generate<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Board> {
    config.validate()?;

    let size = config.size;
    let mut mines: Array2<bool> = Array2::default((size, size).to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut rejected: u32 = 0;

    while mines_placed < config.mines {
        let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
        let cell = &mut mines[coords.to_nd_index()];
        if *cell {
            rejected = rejected.saturating_add(1);
        } else {
            *cell = true;
            mines_placed += 1;
        }
    }

    log::debug!(
        "generated {}x{} board with {} mines ({} samples rejected)",
        size,
        size,
        mines_placed,
        rejected
    );

    Board::from_mine_mask(mines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_adjacent_mines(board: &Board, (x, y): Coord2) -> u8 {
        let mut count = 0;
        for dx in -1i16..=1 {
            for dy in -1i16..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i16 + dx;
                let ny = y as i16 + dy;
                let size = board.size() as i16;
                if (0..size).contains(&nx)
                    && (0..size).contains(&ny)
                    && board.contains_mine((nx as Coord, ny as Coord))
                {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exact_mine_count_for_every_level() {
        for (seed, &config) in LEVELS.iter().enumerate() {
            let board = RandomBoardGenerator::new(seed as u64).generate(config).unwrap();

            assert_eq!(board.mine_count(), config.mines);
            assert_eq!(board.iter_mines().count(), config.mines as usize);
            assert_eq!(board.size(), config.size);
        }
    }

    #[test]
    fn adjacency_counts_match_neighbor_mines() {
        let config = GameConfig::new(12, 40).unwrap();
        let board = RandomBoardGenerator::new(7).generate(config).unwrap();

        for (coords, cell) in board.iter_cells() {
            if !cell.is_mine() {
                assert_eq!(
                    cell.adjacent_mines(),
                    count_adjacent_mines(&board, coords),
                    "count mismatch at {:?}",
                    coords
                );
            }
        }
    }

    #[test]
    fn same_seed_reproduces_board() {
        let config = GameConfig::new(8, 10).unwrap();

        let a = RandomBoardGenerator::new(42).generate(config).unwrap();
        let b = RandomBoardGenerator::new(42).generate(config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn dense_board_still_terminates() {
        let config = GameConfig::new(5, 24).unwrap();
        let board = RandomBoardGenerator::new(3).generate(config).unwrap();

        assert_eq!(board.mine_count(), 24);
        let safe: alloc::vec::Vec<_> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine())
            .collect();
        assert_eq!(safe.len(), 1);
        assert_eq!(safe[0].1.adjacent_mines(), count_adjacent_mines(&board, safe[0].0));
    }

    #[test]
    fn zero_mines_is_allowed() {
        let config = GameConfig::new(3, 0).unwrap();
        let board = RandomBoardGenerator::new(0).generate(config).unwrap();

        assert_eq!(board.mine_count(), 0);
        assert!(board.iter_cells().all(|(_, cell)| cell.adjacent_mines() == 0));
    }

    #[test]
    fn rejects_invalid_config_at_the_boundary() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            generate(GameConfig::new_unchecked(0, 0), &mut rng),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            generate(GameConfig::new_unchecked(3, 9), &mut rng),
            Err(GameError::TooManyMines)
        );
    }
}
