use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Places `config.mines` mines uniformly among the cells outside the safe zone.
///
/// Each mine goes to the k-th still free cell for a random k, so generation needs exactly one draw per
/// mine and never retries.
pub fn generate_mines<R: Rng + ?Sized>(
    config: &BoardConfig,
    safe_cell: Option<Coord2>,
    rng: &mut R,
) -> Result<MineLayout> {
    config.validate(safe_cell)?;

    let size = config.size;
    let mut taken: Array2<bool> = Array2::default(size.to_nd_index());
    if let Some(safe_cell) = safe_cell {
        for coords in iter_coords(size).filter(|&coords| is_adjacent_or_same(coords, safe_cell)) {
            taken[coords.to_nd_index()] = true;
        }
    }

    let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
    let mut free_cells = usize::from(config.eligible_cells(safe_cell));
    for _ in 0..config.mines {
        let place = rng.random_range(0..free_cells);
        let Some(coords) = iter_coords(size)
            .filter(|&coords| !taken[coords.to_nd_index()])
            .nth(place)
        else {
            break;
        };
        taken[coords.to_nd_index()] = true;
        mine_mask[coords.to_nd_index()] = true;
        free_cells -= 1;
    }

    let layout = MineLayout::from_mine_mask(mine_mask);
    if layout.mine_count() != config.mines {
        log::warn!(
            "Generated layout count mismatch, actual: {}, requested: {}",
            layout.mine_count(),
            config.mines
        );
    }
    log::debug!(
        "Generated {}x{} layout with {} mines, safe cell {:?}",
        size.0,
        size.1,
        layout.mine_count(),
        safe_cell
    );
    Ok(layout)
}

/// Seeded generation strategy, reproducible for a given seed and safe cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    safe_cell: Option<Coord2>,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, safe_cell: Option<Coord2>) -> Self {
        Self { seed, safe_cell }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: &BoardConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_mines(config, self.safe_cell, &mut rng)
    }
}
