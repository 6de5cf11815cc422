use ndarray::Array2;
use rand::Rng;

use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: &BoardConfig) -> Result<MineLayout>;
}

/// Numbers every non-mine cell with the count of mines around it.
pub fn compute_adjacency(layout: &MineLayout) -> Array2<CellContent> {
    let size = layout.size();
    let mut grid = Array2::default(size.to_nd_index());
    for coords in iter_coords(size) {
        grid[coords.to_nd_index()] = if layout.contains_mine(coords) {
            CellContent::Mine
        } else {
            CellContent::Count(layout.adjacent_mine_count(coords))
        };
    }
    grid
}

/// Generates a fully numbered board, keeping the 3x3 block around `safe_cell` free of mines.
pub fn generate_board<R: Rng + ?Sized>(
    config: &BoardConfig,
    safe_cell: Option<Coord2>,
    rng: &mut R,
) -> Result<Board> {
    let layout = generate_mines(config, safe_cell, rng)?;
    Ok(Board::new(&layout))
}
