//! Random number generation for town layouts
//!
//! Uses a seeded ChaCha RNG so a seed always reproduces the same layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Generation random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Only the seed is serialized; deserializing restarts the stream.
#[derive(Debug, Clone)]
pub struct TownRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for TownRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TownRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(TownRng::new(seed))
    }
}

impl TownRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `min..max`
    ///
    /// Returns `min` if the range is empty.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform float in `[0, 1)`
    pub fn next_float(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// Returns true with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_float() < p
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.next_int(0, items.len() as i32) as usize])
        }
    }
}

impl Default for TownRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_bounds() {
        let mut rng = TownRng::new(42);
        for _ in 0..1000 {
            let n = rng.next_int(-10, 11);
            assert!((-10..11).contains(&n));
        }
    }

    #[test]
    fn test_next_int_empty_range() {
        let mut rng = TownRng::new(42);
        assert_eq!(rng.next_int(5, 5), 5);
        assert_eq!(rng.next_int(5, 2), 5);
    }

    #[test]
    fn test_next_float_bounds() {
        let mut rng = TownRng::new(7);
        for _ in 0..1000 {
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = TownRng::new(1);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut a = TownRng::new(12345);
        let mut b = TownRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_int(0, 1000), b.next_int(0, 1000));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = TownRng::new(42);
        let items = [1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));
        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_serde_keeps_seed() {
        let rng = TownRng::new(99);
        let json = serde_json::to_string(&rng).unwrap();
        let back: TownRng = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed(), 99);
    }
}
