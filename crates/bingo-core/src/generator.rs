use crate::grid::square_side;
use crate::{BingoError, DateKey, Grid, ItemPool};
use log::debug;

/// Cells on the standard 5x5 card
pub const CARD_CELLS: usize = 25;

/// Derive the card for `date` from `pool`.
///
/// The result depends only on the date and the pool's contents and order, so
/// everyone with the same day and pool sees the same card.
pub fn generate(date: &DateKey, pool: &ItemPool, grid_size: usize) -> Result<Grid, BingoError> {
    if square_side(grid_size).is_none() {
        return Err(BingoError::InvalidGridSize(grid_size));
    }
    if pool.len() < grid_size {
        return Err(BingoError::PoolTooSmall {
            available: pool.len(),
            required: grid_size,
        });
    }

    let mut labels = pool.as_slice().to_vec();
    Generator::for_date(date).shuffle(&mut labels);
    labels.truncate(grid_size);

    debug!(
        "generated {} cell card for {} from a pool of {}",
        grid_size,
        date,
        pool.len()
    );
    Grid::from_labels(labels)
}

/// Card of `side` x `side` cells for `date`
pub fn generate_square(date: &DateKey, pool: &ItemPool, side: usize) -> Result<Grid, BingoError> {
    generate(date, pool, side * side)
}

/// Seeded shuffler behind the daily card.
///
/// Seeding, the PRNG and the swap order are a stability contract: any change
/// reorders every past card.
pub struct Generator {
    rng: Mulberry32,
}

impl Generator {
    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: Mulberry32::new(seed),
        }
    }

    pub fn for_date(date: &DateKey) -> Self {
        Self::with_seed(date.seed())
    }

    /// Shuffle a slice using Fisher-Yates, last index first
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.next_below(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Mulberry32, a 32-bit mixing PRNG
struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform-ish index in `0..bound`, scaling the output as a fraction of 2^32
    fn next_below(&mut self, bound: usize) -> usize {
        ((self.next_u32() as u64 * bound as u64) >> 32) as usize
    }
}
