use serde::{Deserialize, Serialize};

use crate::{FlagOutcome, RevealOutcome};

/// What a cell holds, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    /// Number of mines among the surrounding cells, `0..=8`.
    Count(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// State of one board position.
///
/// While the game runs `revealed` and `flagged` are never both set: flagging a revealed cell and revealing
/// a flagged one are both refused. Losing exposes every mine, flagged ones included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    content: CellContent,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn new(content: CellContent) -> Self {
        Self {
            content,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn content(&self) -> CellContent {
        self.content
    }

    pub const fn is_mine(&self) -> bool {
        self.content.is_mine()
    }

    /// Mine count around the cell, `None` for mines.
    pub const fn adjacent_count(&self) -> Option<u8> {
        match self.content {
            CellContent::Mine => None,
            CellContent::Count(count) => Some(count),
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Neither revealed nor flagged, the only state a reveal acts on.
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Revealed number, `None` while covered or for a mine.
    pub const fn clue(&self) -> Option<u8> {
        if self.revealed {
            self.adjacent_count()
        } else {
            None
        }
    }

    pub(crate) fn reveal(&mut self) -> RevealOutcome {
        if !self.is_hidden() {
            return RevealOutcome::Ignored;
        }

        self.revealed = true;
        match self.content {
            CellContent::Mine => RevealOutcome::Mine,
            CellContent::Count(0) => RevealOutcome::Empty,
            CellContent::Count(_) => RevealOutcome::Number,
        }
    }

    /// Uncovers a mine at the end of a lost game, keeping its flag.
    pub(crate) fn expose(&mut self) {
        if self.is_mine() {
            self.revealed = true;
        }
    }

    pub(crate) fn toggle_flag(&mut self) -> FlagOutcome {
        if self.revealed {
            return FlagOutcome::NoChange;
        }

        self.flagged = !self.flagged;
        if self.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    #[cfg(test)]
    pub(crate) fn cover(&mut self) {
        self.revealed = false;
    }
}

/// How a presentation layer should draw a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine exposed at the end of a lost game.
    Mine,
    /// The mine whose reveal lost the game.
    DetonatedMine,
    /// Flag placed on a cell without a mine, shown once the game is lost.
    FalseFlag,
}

impl CellView {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::FalseFlag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_reports_content() {
        assert_eq!(Cell::new(CellContent::Mine).reveal(), RevealOutcome::Mine);
        assert_eq!(Cell::new(CellContent::Count(0)).reveal(), RevealOutcome::Empty);
        assert_eq!(Cell::new(CellContent::Count(3)).reveal(), RevealOutcome::Number);
    }

    #[test]
    fn flagged_cell_is_not_revealed() {
        let mut cell = Cell::new(CellContent::Count(1));

        assert_eq!(cell.toggle_flag(), FlagOutcome::Flagged);
        assert_eq!(cell.reveal(), RevealOutcome::Ignored);
        assert!(!cell.is_revealed());
        assert_eq!(cell.toggle_flag(), FlagOutcome::Unflagged);
        assert_eq!(cell.reveal(), RevealOutcome::Number);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut cell = Cell::new(CellContent::Count(2));
        cell.reveal();

        assert_eq!(cell.toggle_flag(), FlagOutcome::NoChange);
        assert!(!cell.is_flagged());
        assert_eq!(cell.clue(), Some(2));
    }

    #[test]
    fn expose_uncovers_mines_through_flags() {
        let mut mine = Cell::new(CellContent::Mine);
        mine.toggle_flag();
        let mut safe = Cell::new(CellContent::Count(1));
        safe.toggle_flag();

        mine.expose();
        safe.expose();

        assert!(mine.is_revealed() && mine.is_flagged());
        assert!(!safe.is_revealed() && safe.is_flagged());
    }
}
