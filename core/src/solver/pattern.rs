use super::*;

const ONE_TWO_ONE: [Option<u8>; 3] = [Some(1), Some(2), Some(1)];

/// Looks for three revealed numbers 1, 2, 1 in a line, rows first and then columns.
///
/// Along a free side of the line the two outer cells are mines and the middle one is safe. A side is free
/// when every cell on the opposite side is revealed or off the board, so the 2 sees no unknowns there.
pub(super) fn find_one_two_one(board: &Board) -> Option<Decision> {
    let (width, height) = board.size();

    let rows = (0..height).flat_map(|y| (0..width.saturating_sub(2)).map(move |x| (x, y)));
    for start in rows {
        if let Some(decision) = resolve_line(board, start, (1, 0), [(0, 1), (0, -1)]) {
            return Some(decision);
        }
    }

    let columns = (0..width).flat_map(|x| (0..height.saturating_sub(2)).map(move |y| (x, y)));
    for start in columns {
        if let Some(decision) = resolve_line(board, start, (0, 1), [(1, 0), (-1, 0)]) {
            return Some(decision);
        }
    }

    None
}

fn resolve_line(
    board: &Board,
    start: Coord2,
    step: (i8, i8),
    sides: [(i8, i8); 2],
) -> Option<Decision> {
    let size = board.size();
    let line = [
        start,
        offset(start, step, size)?,
        offset(start, (step.0 * 2, step.1 * 2), size)?,
    ];
    if line.map(|coords| board.cell_at(coords).clue()) != ONE_TWO_ONE {
        return None;
    }

    for side in sides {
        let Some([first, middle, last]) = shift_line(line, side, size) else {
            continue;
        };
        let opposite = shift_line(line, (-side.0, -side.1), size);
        if opposite.is_some_and(|cells| cells.iter().any(|&c| !board.cell_at(c).is_revealed())) {
            continue;
        }

        log::trace!("1-2-1 at {:?} stepping {:?}, acting on side {:?}", start, step, side);
        for outer in [first, last] {
            if board.cell_at(outer).is_hidden() {
                return Some(Decision::new(Action::FlagCell(outer), Reason::OneTwoOne));
            }
        }
        if board.cell_at(middle).is_hidden() {
            return Some(Decision::new(Action::RevealCell(middle), Reason::OneTwoOne));
        }
    }

    None
}

fn shift_line(line: [Coord2; 3], delta: (i8, i8), size: Coord2) -> Option<[Coord2; 3]> {
    Some([
        offset(line[0], delta, size)?,
        offset(line[1], delta, size)?,
        offset(line[2], delta, size)?,
    ])
}
