use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed difficulty presets, easiest first.
pub const LEVELS: [GameConfig; 4] = [
    GameConfig::new_unchecked(5, 3),
    GameConfig::new_unchecked(8, 10),
    GameConfig::new_unchecked(12, 20),
    GameConfig::new_unchecked(15, 30),
];

/// Position in [`LEVELS`], always in range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCursor {
    index: usize,
}

impl LevelCursor {
    pub fn new(index: usize) -> Result<Self> {
        if index < LEVELS.len() {
            Ok(Self { index })
        } else {
            Err(GameError::InvalidLevel)
        }
    }

    pub const fn index(self) -> usize {
        self.index
    }

    pub const fn current(self) -> GameConfig {
        LEVELS[self.index]
    }

    pub const fn is_last(self) -> bool {
        self.index + 1 == LEVELS.len()
    }

    /// Moves to the next level, returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.index += 1;
            true
        }
    }

    /// Moves to the previous level, returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            false
        } else {
            self.index -= 1;
            true
        }
    }

    /// Fresh game on a newly generated board for the current level.
    pub fn new_engine(self, seed: u64) -> Result<PlayEngine> {
        let board = RandomBoardGenerator::new(seed).generate(self.current())?;
        Ok(PlayEngine::new(board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_and_increasing() {
        for config in LEVELS {
            assert_eq!(config.validate(), Ok(()));
        }
        assert!(LEVELS.windows(2).all(|pair| pair[0].size < pair[1].size));
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut cursor = LevelCursor::default();

        assert!(!cursor.previous());
        assert_eq!(cursor.index(), 0);

        while cursor.next() {}
        assert_eq!(cursor.index(), LEVELS.len() - 1);
        assert!(cursor.is_last());
        assert!(!cursor.next());
        assert_eq!(cursor.current(), GameConfig::new(15, 30).unwrap());
    }

    #[test]
    fn cursor_rejects_unknown_level() {
        assert_eq!(LevelCursor::new(LEVELS.len()), Err(GameError::InvalidLevel));
        assert_eq!(LevelCursor::new(1).map(LevelCursor::current), Ok(LEVELS[1]));
    }

    #[test]
    fn new_engine_uses_current_preset() {
        let cursor = LevelCursor::new(1).unwrap();
        let engine = cursor.new_engine(5).unwrap();

        assert_eq!(engine.size(), 8);
        assert_eq!(engine.total_mines(), 10);
        assert_eq!(engine.state(), EngineState::Active);
    }
}
