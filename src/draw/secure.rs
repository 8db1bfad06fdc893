use rand::rngs::OsRng;

use crate::draw::{draw_distinct, DrawSource};
use crate::error::Result;

/// Draws from the operating system's CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureDraw;

impl DrawSource for SecureDraw {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>> {
        draw_distinct(&mut OsRng, count, min, max)
    }
}
