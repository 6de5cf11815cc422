use ndarray::Array2;

/// Single coordinate axis, used for board width, height and positions.
pub type Coord = u8;

/// Count type for mines, flags and cells.
pub type CellCount = u16;

/// Board coordinates `(x, y)`: `x` is the column, `y` the row.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Shifts `coords` by `(dx, dy)`, `None` when the result leaves the board.
pub fn offset(coords: Coord2, (dx, dy): (i8, i8), size: Coord2) -> Option<Coord2> {
    let x = coords.0.checked_add_signed(dx)?;
    let y = coords.1.checked_add_signed(dy)?;
    in_bounds((x, y), size).then_some((x, y))
}

/// Size of the board backing an `Array2`.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (x, y) = grid.dim();
    (x as Coord, y as Coord)
}

// row above, same row, row below
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The in-bounds cells among the 8 surrounding `center`.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord2,
    index: usize,
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(self.index) {
            self.index += 1;
            if let Some(coords) = offset(self.center, delta, self.size) {
                return Some(coords);
            }
        }
        None
    }
}

pub fn neighbors(center: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        size,
        index: 0,
    }
}

/// Every cell of a board, top-to-bottom then left-to-right.
pub fn iter_coords((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

/// Whether `a` and `b` are within one step of each other, diagonals included.
pub fn is_adjacent_or_same(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<_> = neighbors((0, 0), (10, 10)).collect();

        assert_eq!(found, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(neighbors((4, 4), (10, 10)).count(), 8);
        assert!(neighbors((4, 4), (10, 10)).all(|n| n != (4, 4)));
    }

    #[test]
    fn iter_coords_scans_rows_first() {
        let found: Vec<_> = iter_coords((2, 2)).collect();

        assert_eq!(found, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn offset_rejects_leaving_board() {
        assert_eq!(offset((0, 3), (-1, 0), (5, 5)), None);
        assert_eq!(offset((4, 3), (1, 0), (5, 5)), None);
        assert_eq!(offset((2, 3), (1, -1), (5, 5)), Some((3, 2)));
    }
}
