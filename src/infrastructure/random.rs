use crate::domain::ports::RandomSource;
use crate::error::{Result, WalletError};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::collections::VecDeque;

/// 2^53: the number of evenly spaced doubles in `[0, 1)` a draw can land on.
const DRAW_RESOLUTION: f64 = (1u64 << 53) as f64;

fn to_unit_interval(bits: u64) -> f64 {
    (bits >> 11) as f64 / DRAW_RESOLUTION
}

/// Draws from the operating system's CSPRNG.
///
/// This is the production source. Failures reading the OS generator are surfaced
/// as `RandomSourceFailure` rather than retried.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl OsRandomSource {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for OsRandomSource {
    fn next_draw(&mut self) -> Result<f64> {
        let mut buffer = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut buffer)
            .map_err(WalletError::random_source)?;
        Ok(to_unit_interval(u64::from_le_bytes(buffer)))
    }
}

/// A reproducible source seeded from a `u64`, for simulations and replays.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    rng: StdRng,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_draw(&mut self) -> Result<f64> {
        Ok(to_unit_interval(self.rng.next_u64()))
    }
}

/// Replays a fixed list of draws, then fails once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomSource {
    draws: VecDeque<f64>,
}

impl ScriptedRandomSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_draw(&mut self) -> Result<f64> {
        self.draws
            .pop_front()
            .ok_or_else(|| WalletError::random_source("scripted random source exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds() {
        assert_eq!(to_unit_interval(0), 0.0);
        let top = to_unit_interval(u64::MAX);
        assert!(top < 1.0);
        assert!(top > 0.999_999_999);
    }

    #[test]
    fn test_os_source_draws_in_range() {
        let mut source = OsRandomSource::new();
        for _ in 0..1_000 {
            let draw = source.next_draw().unwrap();
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeededRandomSource::new(42);
        let mut b = SeededRandomSource::new(42);
        let mut c = SeededRandomSource::new(43);

        let first: Vec<f64> = (0..16).map(|_| a.next_draw().unwrap()).collect();
        let second: Vec<f64> = (0..16).map(|_| b.next_draw().unwrap()).collect();
        let other: Vec<f64> = (0..16).map(|_| c.next_draw().unwrap()).collect();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(first.iter().all(|d| (0.0..1.0).contains(d)));
    }

    #[test]
    fn test_scripted_source_exhaustion() {
        let mut source = ScriptedRandomSource::new([0.25, 0.75]);
        assert_eq!(source.next_draw().unwrap(), 0.25);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_draw().unwrap(), 0.75);
        assert!(matches!(
            source.next_draw(),
            Err(WalletError::RandomSourceFailure(_))
        ));
    }
}
