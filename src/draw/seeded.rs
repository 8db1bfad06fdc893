use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::draw::{draw_distinct, DrawSource};
use crate::error::Result;

/// Reproducible draws for replaying a run.
pub struct SeededDraw {
    rng: StdRng,
}

impl SeededDraw {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededDraw {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>> {
        draw_distinct(&mut self.rng, count, min, max)
    }
}
