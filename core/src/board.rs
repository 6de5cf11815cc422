use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Win
/// - Playing -> Loss
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Win,
    Loss,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// A numbered minefield together with what the player has revealed and flagged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    detonated: Option<Coord2>,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        Self::from_contents(compute_adjacency(layout))
    }

    pub fn from_contents(contents: Array2<CellContent>) -> Self {
        let mine_count = contents.iter().filter(|content| content.is_mine()).count() as CellCount;
        Self {
            cells: contents.mapv(Cell::new),
            mine_count,
            flagged_count: 0,
            status: GameStatus::Playing,
            detonated: None,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(|layout| Self::new(&layout))
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, negative once the player has over-flagged.
    pub fn mines_left(&self) -> isize {
        self.mine_count as isize - self.flagged_count as isize
    }

    /// The mine whose reveal ended the game.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Panics on out-of-bounds coordinates, use [`Board::get`] for unchecked input.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords { coords })
        }
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size())
    }

    /// Cells a reveal would act on: neither revealed nor flagged.
    pub fn iter_hidden(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self.cell_at(coords).is_hidden())
    }

    /// Revealed cells showing a number in `1..=8`, with that number.
    pub fn iter_clues(&self) -> impl Iterator<Item = (Coord2, u8)> + '_ {
        iter_coords(self.size()).filter_map(|coords| match self.cell_at(coords).clue() {
            Some(0) | None => None,
            Some(count) => Some((coords, count)),
        })
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        let cell = self.cell_at(coords);
        match (cell.content(), cell.is_revealed(), cell.is_flagged()) {
            (CellContent::Mine, true, _) if self.detonated == Some(coords) => CellView::DetonatedMine,
            (CellContent::Mine, true, _) => CellView::Mine,
            (CellContent::Count(count), true, _) => CellView::Revealed(count),
            (CellContent::Count(_), false, true) if self.status == GameStatus::Loss => {
                CellView::FalseFlag
            }
            (_, false, true) => CellView::Flagged,
            (CellContent::Mine, false, false) if self.status == GameStatus::Win => CellView::Flagged,
            (_, false, false) => CellView::Hidden,
        }
    }

    /// Reveals one cell, opening the whole surrounding region when it has no neighboring mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.status.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(RevealOutcome::Ignored);
        }

        let outcome = self.cells[coords.to_nd_index()].reveal();
        log::debug!("Reveal at {:?}: {:?}", coords, outcome);
        match outcome {
            RevealOutcome::Mine => {
                self.detonated = Some(coords);
                self.expose_mines();
            }
            RevealOutcome::Empty => {
                self.expand_from(coords);
            }
            RevealOutcome::Number | RevealOutcome::Ignored => {}
        }

        self.refresh_status();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        let outcome = self.cells[coords.to_nd_index()].toggle_flag();
        match outcome {
            FlagOutcome::Flagged => self.flagged_count += 1,
            FlagOutcome::Unflagged => self.flagged_count -= 1,
            FlagOutcome::NoChange => {}
        }
        log::debug!("Toggle flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Opens the region reachable from `coords` through cells without neighboring mines.
    ///
    /// Returns how many cells were newly revealed. Only a revealed zero cell expands, anything else opens
    /// nothing. [`Board::reveal`] already runs this for the cells it opens.
    pub fn flood_reveal(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        if self.status.is_finished() || self.cell_at(coords).clue() != Some(0) {
            return Ok(0);
        }

        let opened = self.expand_from(coords);
        self.refresh_status();
        Ok(opened)
    }

    /// Every non-mine cell is revealed, flags do not matter.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.is_revealed())
    }

    pub fn check_loss(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.is_mine() && cell.is_revealed())
    }

    fn expand_from(&mut self, origin: Coord2) -> CellCount {
        let size = self.size();
        let mut visited: Array2<bool> = Array2::default(size.to_nd_index());
        let mut to_visit = VecDeque::from([origin]);
        let mut opened: CellCount = 0;
        visited[origin.to_nd_index()] = true;

        while let Some(visit_coords) = to_visit.pop_front() {
            for neighbor in neighbors(visit_coords, size) {
                if visited[neighbor.to_nd_index()] {
                    continue;
                }
                visited[neighbor.to_nd_index()] = true;

                // flagged and already revealed cells stay as they are
                match self.cells[neighbor.to_nd_index()].reveal() {
                    RevealOutcome::Empty => {
                        opened += 1;
                        to_visit.push_back(neighbor);
                    }
                    RevealOutcome::Number => opened += 1,
                    RevealOutcome::Mine => {
                        log::warn!("Flood fill from {:?} reached mine at {:?}", origin, neighbor);
                        self.detonated = Some(neighbor);
                        self.expose_mines();
                        return opened;
                    }
                    RevealOutcome::Ignored => {}
                }
            }
        }

        log::trace!("Flood fill from {:?} opened {} cells", origin, opened);
        opened
    }

    fn expose_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.expose();
        }
    }

    fn refresh_status(&mut self) {
        if self.status.is_finished() {
            return;
        }

        if self.check_loss() {
            self.status = GameStatus::Loss;
        } else if self.check_win() {
            self.status = GameStatus::Win;
        }
        if self.status.is_finished() {
            log::debug!("Game ended: {:?}", self.status);
        }
    }

    #[cfg(test)]
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}
