use crate::draw::{check_range, DrawSource};
use crate::error::Result;

/// Replays a fixed list of draws, cycling back to the first once exhausted.
///
/// The requested range is still checked, but the scripted values are returned
/// as given (sorted), so callers can inject exact rounds.
#[derive(Clone, Debug)]
pub struct ScriptedDraw {
    draws: Vec<Vec<u32>>,
    next: usize,
}

impl ScriptedDraw {
    pub fn new(draws: Vec<Vec<u32>>) -> Self {
        Self { draws, next: 0 }
    }
}

impl DrawSource for ScriptedDraw {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>> {
        check_range(count, min, max)?;
        if self.draws.is_empty() {
            return Ok(Vec::new());
        }
        let mut numbers = self.draws[self.next].clone();
        self.next = (self.next + 1) % self.draws.len();
        numbers.sort_unstable();
        Ok(numbers)
    }
}
