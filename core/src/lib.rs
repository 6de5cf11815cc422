#![no_std]

extern crate alloc;

use core::ops::{Index, RangeInclusive};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use solver::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod solver;
mod types;

/// Dimensions and mine count of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const DEFAULT_SIZE: Coord2 = (10, 10);

    /// Mine counts offered to players, the engine itself accepts more.
    pub const RECOMMENDED_MINES: RangeInclusive<CellCount> = 10..=20;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checked constructor, requires a non-empty board and `1 <= mines < width * height`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate(None)?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Number of cells in the 3x3 block around `safe_cell`, clipped to the board.
    pub fn safe_zone_size(&self, safe_cell: Coord2) -> CellCount {
        iter_coords(self.size)
            .filter(|&coords| is_adjacent_or_same(coords, safe_cell))
            .count() as CellCount
    }

    /// Cells that may receive a mine once the safe zone is excluded.
    pub fn eligible_cells(&self, safe_cell: Option<Coord2>) -> CellCount {
        let excluded = safe_cell.map_or(0, |safe_cell| self.safe_zone_size(safe_cell));
        self.total_cells() - excluded
    }

    pub fn validate(&self, safe_cell: Option<Coord2>) -> Result<()> {
        if self.total_cells() == 0 {
            return Err(GameError::InvalidSize { size: self.size });
        }
        if let Some(coords) = safe_cell {
            if !in_bounds(coords, self.size) {
                return Err(GameError::InvalidCoords { coords });
            }
        }

        let eligible = self.eligible_cells(safe_cell);
        if self.mines == 0 || self.mines >= eligible {
            return Err(GameError::InvalidMineCount {
                mines: self.mines,
                eligible,
            });
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, *Self::RECOMMENDED_MINES.start())
    }
}

/// Where the mines are, before any numbering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if mult(size.0, size.1) == 0 {
            return Err(GameError::InvalidSize { size });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords { coords });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of revealing a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The cell held a mine, the game is lost.
    Mine,
    /// The cell had no neighboring mines, the surrounding region was opened too.
    Empty,
    /// The cell shows a count in `1..=8`.
    Number,
    /// Already revealed, flagged, or the game is over. Nothing changed.
    Ignored,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    NoChange,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
