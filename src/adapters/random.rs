use crate::domain::ports::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `RandomSource` backed by ChaCha8, reproducible from its seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks a fresh seed from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn index_below(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn value_in(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Serial, SerialRange};
    use crate::utils::error::SalvageError;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::from_seed(42);
        let mut b = SeededRandom::from_seed(42);
        let xs: Vec<usize> = (0..20).map(|_| a.index_below(100)).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.index_below(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_choose_uniform_covers_all_options() {
        let mut rng = SeededRandom::from_seed(7);
        let options = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*rng.choose_uniform(&options).unwrap());
        }
        assert_eq!(seen.len(), 3);
        assert!(rng.choose_uniform::<&str>(&[]).is_none());
    }

    #[test]
    fn test_random_serial_skips_taken_values() {
        // Only 1 and 3 are free in a range of four values.
        let range = SerialRange { min: 0, max: 3 };
        let taken = [Serial::new(0), Serial::new(2)];
        let mut rng = SeededRandom::from_seed(1);
        for _ in 0..50 {
            let serial = rng.random_serial(range, |s| taken.contains(&s), 1_000).unwrap();
            assert!(serial == Serial::new(1) || serial == Serial::new(3));
        }
    }

    #[test]
    fn test_random_serial_gives_up_when_range_is_full() {
        let range = SerialRange { min: 10, max: 11 };
        let mut rng = SeededRandom::from_seed(3);
        let err = rng.random_serial(range, |_| true, 25).unwrap_err();
        assert!(err.to_string().contains("25 attempts"));
    }

    #[test]
    fn test_random_serial_on_inverted_range_is_an_error() {
        let range = SerialRange { min: 9, max: 1 };
        let mut rng = SeededRandom::from_seed(3);
        let err = rng.random_serial(range, |_| false, 25).unwrap_err();
        assert!(matches!(err, SalvageError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_random_serial_draws_at_least_once() {
        let range = SerialRange { min: 5, max: 5 };
        let mut rng = SeededRandom::from_seed(3);
        assert_eq!(rng.random_serial(range, |_| false, 0).unwrap(), Serial::new(5));
    }
}
