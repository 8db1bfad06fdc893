//! Random draw generator and the sources the engine pulls rounds from.

mod scripted;
mod secure;
mod seeded;

use std::collections::BTreeSet;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::models::DrawConfig;

pub use scripted::ScriptedDraw;
pub use secure::SecureDraw;
pub use seeded::SeededDraw;

/// Supplies one draw per round.
///
/// Implementations return `count` distinct values in `[min, max]`, sorted
/// ascending, and fail with [`Error::InvalidRange`] when the range cannot
/// hold that many distinct values.
pub trait DrawSource: Send {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>>;
}

pub fn build_source(draw: DrawConfig, seed: Option<u64>) -> Result<Box<dyn DrawSource>> {
    match draw {
        DrawConfig::Secure => Ok(Box::new(SecureDraw)),
        DrawConfig::Seeded => {
            let seed = seed.ok_or(Error::SeedRequired)?;
            Ok(Box::new(SeededDraw::new(seed)))
        }
    }
}

/// Draws `count` pairwise-distinct integers uniformly from `[min, max]`,
/// sorted ascending.
///
/// Each value is rejection sampled from big-endian random bytes, so there is
/// no modulo bias. Values already drawn in this call are discarded and redrawn.
pub fn draw_distinct<R>(rng: &mut R, count: usize, min: u32, max: u32) -> Result<Vec<u32>>
where
    R: RngCore + ?Sized,
{
    let range = check_range(count, min, max)?;

    let mut numbers = BTreeSet::new();
    while numbers.len() < count {
        let value = random_below(rng, range);
        numbers.insert(min + value as u32);
    }

    Ok(numbers.into_iter().collect())
}

/// Returns the size of `[min, max]` when it can supply `count` distinct values.
pub(crate) fn check_range(count: usize, min: u32, max: u32) -> Result<u64> {
    let invalid = Error::InvalidRange { count, min, max };
    if max < min {
        return Err(invalid);
    }
    let range = u64::from(max - min) + 1;
    if count as u64 > range {
        return Err(invalid);
    }
    Ok(range)
}

fn random_below<R>(rng: &mut R, range: u64) -> u64
where
    R: RngCore + ?Sized,
{
    let bytes_needed = bytes_for_range(range);
    let mut buf = [0u8; 8];
    loop {
        buf.fill(0);
        rng.fill_bytes(&mut buf[8 - bytes_needed..]);
        let value = u64::from_be_bytes(buf);
        if value < range {
            return value;
        }
    }
}

fn bytes_for_range(range: u64) -> usize {
    let bits = u64::BITS - (range - 1).leading_zeros();
    bits.div_ceil(8) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Hands out a fixed byte sequence, then zeros.
    struct ByteRng {
        bytes: Vec<u8>,
        next: usize,
    }

    impl ByteRng {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ByteRng {
        fn next_u32(&mut self) -> u32 {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            u32::from_be_bytes(buf)
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_be_bytes(buf)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest.iter_mut() {
                *byte = self.bytes.get(self.next).copied().unwrap_or(0);
                self.next += 1;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn assert_valid_draw(numbers: &[u32], count: usize, min: u32, max: u32) {
        assert_eq!(numbers.len(), count);
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(numbers.iter().all(|n| (min..=max).contains(n)));
    }

    #[test]
    fn draws_are_distinct_sorted_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let numbers = draw_distinct(&mut rng, 5, 1, 90).expect("draw should succeed");
            assert_valid_draw(&numbers, 5, 1, 90);
        }
    }

    #[test]
    fn full_range_draw_returns_every_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let numbers = draw_distinct(&mut rng, 10, 11, 20).expect("draw should succeed");
        assert_eq!(numbers, (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn single_value_range_needs_no_entropy() {
        let mut rng = StdRng::seed_from_u64(1);
        let numbers = draw_distinct(&mut rng, 1, 42, 42).expect("draw should succeed");
        assert_eq!(numbers, vec![42]);
    }

    #[test]
    fn zero_count_returns_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let numbers = draw_distinct(&mut rng, 0, 1, 90).expect("draw should succeed");
        assert!(numbers.is_empty());
    }

    #[test]
    fn wide_ranges_use_multiple_bytes() {
        let mut rng = StdRng::seed_from_u64(11);
        let numbers = draw_distinct(&mut rng, 8, 0, u32::MAX).expect("draw should succeed");
        assert_valid_draw(&numbers, 8, 0, u32::MAX);
    }

    #[test]
    fn oversized_count_is_invalid_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = draw_distinct(&mut rng, 6, 1, 5).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidRange {
                count: 6,
                min: 1,
                max: 5
            }
        );
        assert_eq!(err.to_string(), "cannot draw 6 distinct numbers from [1, 5]");
    }

    #[test]
    fn inverted_bounds_are_invalid_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            draw_distinct(&mut rng, 1, 10, 9),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn out_of_range_bytes_are_redrawn() {
        let mut rng = ByteRng::new(&[200, 95, 3]);
        let numbers = draw_distinct(&mut rng, 1, 10, 99).expect("draw should succeed");
        assert_eq!(numbers, vec![13]);
        assert_eq!(rng.next, 3);
    }

    #[test]
    fn multi_byte_values_read_big_endian() {
        // 0x012C = 300 is rejected for a range of 300; 0x0102 = 258 is kept.
        let mut rng = ByteRng::new(&[0x01, 0x2C, 0x01, 0x02]);
        let numbers = draw_distinct(&mut rng, 1, 0, 299).expect("draw should succeed");
        assert_eq!(numbers, vec![258]);
        assert_eq!(rng.next, 4);
    }

    #[test]
    fn repeated_values_are_redrawn() {
        let mut rng = ByteRng::new(&[4, 4, 200, 7]);
        let numbers = draw_distinct(&mut rng, 2, 1, 90).expect("draw should succeed");
        assert_eq!(numbers, vec![5, 8]);
    }

    #[test]
    fn bytes_cover_the_range() {
        assert_eq!(bytes_for_range(1), 0);
        assert_eq!(bytes_for_range(90), 1);
        assert_eq!(bytes_for_range(256), 1);
        assert_eq!(bytes_for_range(257), 2);
        assert_eq!(bytes_for_range(1 << 32), 4);
    }

    #[test]
    fn every_value_is_reachable() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 90];
        for _ in 0..400 {
            for n in draw_distinct(&mut rng, 5, 1, 90).expect("draw should succeed") {
                seen[(n - 1) as usize] = true;
            }
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn seeded_source_requires_seed() {
        assert!(matches!(
            build_source(DrawConfig::Seeded, None),
            Err(Error::SeedRequired)
        ));
        assert!(build_source(DrawConfig::Seeded, Some(5)).is_ok());
        assert!(build_source(DrawConfig::Secure, None).is_ok());
    }
}
