use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

impl Board {
    /// Reveals a hidden cell.
    ///
    /// Hitting a mine discloses every mine on the board, flagged or not. A zero cell floods out
    /// through its orthogonal neighbors.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        self.set_state(coords, CellState::Revealed);

        if cell.is_mine() {
            self.reveal_all_mines();
            return Ok(RevealOutcome::Loss);
        }

        if cell.adjacent_mines() == 0 {
            let opened = self.flood_reveal(coords);
            log::trace!("flood from {:?} opened {} cells", coords, opened);
        }

        Ok(RevealOutcome::Continue)
    }

    /// Flips a cell between hidden and flagged, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        Ok(match self[coords].state() {
            Hidden => {
                self.set_state(coords, Flagged);
                Changed
            }
            Flagged => {
                self.set_state(coords, Hidden);
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn remove_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self[coords].is_flagged() {
            self.set_state(coords, CellState::Hidden);
            Ok(MarkOutcome::Changed)
        } else {
            Ok(MarkOutcome::NoChange)
        }
    }

    /// Whether every mine carries a flag. Safe cells are not considered.
    pub fn check_win(&self) -> bool {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine())
            .all(|(_, cell)| cell.is_flagged())
    }

    /// Opens the 4-connected region around an already revealed zero cell.
    ///
    /// Only hidden safe cells are opened. Numbered cells are opened but not expanded. Cells are
    /// revealed before being queued so each one is processed once. Returns how many were opened.
    fn flood_reveal(&mut self, origin: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.iter_orthogonal(visit_coords) {
                let neighbor = self[pos];
                if !neighbor.is_hidden() || neighbor.is_mine() {
                    continue;
                }

                self.set_state(pos, CellState::Revealed);
                opened += 1;

                if neighbor.adjacent_mines() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        opened
    }

    fn reveal_all_mines(&mut self) {
        let size = self.size();
        for x in 0..size {
            for y in 0..size {
                if self.contains_mine((x, y)) {
                    self.set_state((x, y), CellState::Revealed);
                }
            }
        }
    }
}

/// How a click on the board is interpreted, chosen by the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Reveal,
    Flag,
    /// Removes the flag of the clicked cell, if it has one.
    Unflag,
}

impl Default for InteractionMode {
    fn default() -> Self {
        Self::Reveal
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NoChange,
    Continue,
    Won,
    Lost,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One play session over a single board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.cell_at(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn act(&mut self, mode: InteractionMode, coords: Coord2) -> Result<MoveOutcome> {
        use InteractionMode::*;

        match mode {
            Reveal => self.reveal(coords),
            Flag => self.toggle_flag(coords),
            Unflag => self.remove_flag(coords),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.check_active()?;

        Ok(match self.board.reveal(coords)? {
            RevealOutcome::NoChange => MoveOutcome::NoChange,
            RevealOutcome::Continue => MoveOutcome::Continue,
            RevealOutcome::Loss => {
                log::debug!("mine hit at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.state = EngineState::Lost;
                MoveOutcome::Lost
            }
        })
    }

    /// Toggles a flag, the win rule is checked after every change.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.check_active()?;

        Ok(match self.board.toggle_flag(coords)? {
            MarkOutcome::NoChange => MoveOutcome::NoChange,
            MarkOutcome::Changed if self.board.check_win() => {
                log::debug!("all {} mines flagged", self.board.mine_count());
                self.state = EngineState::Won;
                MoveOutcome::Won
            }
            MarkOutcome::Changed => MoveOutcome::Continue,
        })
    }

    pub fn remove_flag(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.check_active()?;

        Ok(match self.board.remove_flag(coords)? {
            MarkOutcome::NoChange => MoveOutcome::NoChange,
            MarkOutcome::Changed => MoveOutcome::Continue,
        })
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
