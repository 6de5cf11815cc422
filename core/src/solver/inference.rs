use smallvec::SmallVec;

use super::*;

/// What a revealed number sees around itself.
#[derive(Clone, Debug)]
struct Surroundings {
    /// Neither revealed nor flagged.
    hidden: SmallVec<[Coord2; 8]>,
    /// Flags that count toward the number under the current [`FlagTrust`].
    flagged_mines: u8,
}

fn survey(board: &Board, coords: Coord2, trust: FlagTrust) -> Surroundings {
    let mut hidden = SmallVec::new();
    let mut flagged_mines = 0;
    for neighbor in board.neighbors(coords) {
        let cell = board.cell_at(neighbor);
        if cell.is_hidden() {
            hidden.push(neighbor);
        } else if cell.is_flagged() && trust.counts(&cell) {
            flagged_mines += 1;
        }
    }
    Surroundings {
        hidden,
        flagged_mines,
    }
}

/// A number whose hidden neighbors are exactly its missing mines: the first of them is a mine.
pub(super) fn find_forced_mine(board: &Board, trust: FlagTrust) -> Option<Decision> {
    board.iter_clues().find_map(|(coords, count)| {
        let around = survey(board, coords, trust);
        let first = *around.hidden.first()?;
        (usize::from(count) == around.hidden.len() + usize::from(around.flagged_mines)).then(|| {
            log::trace!("{:?} shows {} with all hidden neighbors mined", coords, count);
            Decision::new(Action::FlagCell(first), Reason::MinesSaturated)
        })
    })
}

/// A number whose mines are all flagged: its hidden neighbors are safe.
pub(super) fn find_safe_cell(board: &Board, trust: FlagTrust) -> Option<Decision> {
    board.iter_clues().find_map(|(coords, count)| {
        let around = survey(board, coords, trust);
        let first = *around.hidden.first()?;
        (count == around.flagged_mines).then(|| {
            log::trace!("{:?} shows {} with every mine flagged", coords, count);
            Decision::new(Action::RevealCell(first), Reason::QuotaMet)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 2 * 2 0
    // 0 3 * 3 0
    // 0 2 * 2 0
    fn walled() -> Board {
        Board::from_mine_coords((5, 3), &[(2, 0), (2, 1), (2, 2)]).unwrap()
    }

    #[test]
    fn survey_splits_hidden_and_flagged() {
        let mut board = walled();
        board.reveal((3, 1)).unwrap();
        board.toggle_flag((2, 0)).unwrap();
        board.toggle_flag((3, 0)).unwrap();

        let verified = survey(&board, (3, 1), FlagTrust::Verified);
        let counted = survey(&board, (3, 1), FlagTrust::Counted);

        assert_eq!(verified.hidden.as_slice(), [(4, 0), (2, 1), (4, 1), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(verified.flagged_mines, 1);
        assert_eq!(counted.flagged_mines, 2);
    }

    #[test]
    fn forced_mine_needs_matching_count() {
        let mut board = walled();
        board.reveal((0, 0)).unwrap();

        let decision = find_forced_mine(&board, FlagTrust::Verified).unwrap();

        assert_eq!(decision.action, Action::FlagCell((2, 0)));
        assert!(find_safe_cell(&board, FlagTrust::Verified).is_none());
    }

    #[test]
    fn safe_cell_once_flags_cover_count() {
        let mut board = walled();
        board.reveal((3, 1)).unwrap();
        for coords in [(2, 0), (2, 1), (2, 2)] {
            board.toggle_flag(coords).unwrap();
        }

        assert!(find_forced_mine(&board, FlagTrust::Verified).is_none());
        let decision = find_safe_cell(&board, FlagTrust::Verified).unwrap();

        assert_eq!(decision.action, Action::RevealCell((3, 0)));
        assert_eq!(decision.reason, Reason::QuotaMet);
    }
}
