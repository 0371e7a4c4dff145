//! Deterministic Random Number Generator
//!
//! Order generation never reaches for a global RNG. Every draw goes through
//! [`RandomSource`], so a caller can hand in a seeded [`DeterministicRng`]
//! for reproducible rounds, or a scripted source in tests.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

/// Source of uniformly distributed 64-bit values.
///
/// Only [`next_u64`](RandomSource::next_u64) must be implemented; every
/// other draw used by the game is derived from it.
pub trait RandomSource {
    /// Generate the next 64-bit random value.
    fn next_u64(&mut self) -> u64;

    /// Generate a float uniformly in [0, 1).
    ///
    /// Uses the top 53 bits, so every representable step is equally likely.
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - bias is negligible for the small ranges used here
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random integer in range [min, max].
    #[inline]
    fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        // u64 so that [0, u32::MAX] does not overflow
        let range = (max - min) as u64 + 1;
        min + (self.next_u64() % range) as u32
    }

    /// Shuffle a slice in place using Fisher-Yates algorithm.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            slice.swap(i, j);
        }
    }

    /// Select a random element from a slice.
    fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = (self.next_u64() % slice.len() as u64) as usize;
            Some(&slice[idx])
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// Given the same seed, this RNG will produce the exact same sequence
/// of random numbers on any platform.
///
/// # Example
///
/// ```
/// use terms_conditions::core::rng::DeterministicRng;
/// use terms_conditions::core::rng::RandomSource;
///
/// let mut rng = DeterministicRng::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(value, 6233086606872742541); // Always the same!
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

impl RandomSource for DeterministicRng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive the seed for one round of a session.
///
/// Every round gets its own generator, so replaying round `n` does not
/// require replaying rounds `0..n` first.
pub fn derive_round_seed(session_seed: u64, round: u32) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"TERMS_CONDITIONS_ROUND_V1");
    hasher.update(session_seed.to_le_bytes());
    hasher.update(round.to_le_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_known_values() {
        // Replays of recorded sessions depend on these never changing.
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_u64(), 16629283624882167704);
        assert_eq!(rng.next_u64(), 1420492921613871959);
        assert_eq!(rng.next_u64(), 9768315062676884790);
    }

    #[test]
    fn test_next_unit_range() {
        let mut rng = DeterministicRng::new(777);

        for _ in 0..10_000 {
            let val = rng.next_unit();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn test_next_int() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_int(100) < 100);
        }

        // Edge case: max = 0
        assert_eq!(rng.next_int(0), 0);

        // Edge case: max = 1
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_int_inclusive() {
        let mut rng = DeterministicRng::new(5678);
        let mut seen = [false; 5];

        for _ in 0..1000 {
            let val = rng.next_int_inclusive(1, 5);
            assert!((1..=5).contains(&val));
            seen[(val - 1) as usize] = true;
        }

        // Both ends of the range are reachable
        assert!(seen.iter().all(|s| *s));

        // Edge case: min = max
        assert_eq!(rng.next_int_inclusive(5, 5), 5);
    }

    #[test]
    fn test_next_int_inclusive_full_range() {
        let mut rng = DeterministicRng::new(4321);

        // Full u32 span must not overflow
        for _ in 0..1000 {
            rng.next_int_inclusive(0, u32::MAX);
        }

        for _ in 0..1000 {
            let val = rng.next_int_inclusive(u32::MAX - 1, u32::MAX);
            assert!(val >= u32::MAX - 1);
        }
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = DeterministicRng::new(1111);
        let mut rng2 = DeterministicRng::new(1111);

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut arr2 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);

        let mut sorted = arr1;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_shuffle_matches_next_int_draws() {
        // Shuffle index draws agree with next_int for small slices
        let mut rng1 = DeterministicRng::new(2222);
        let mut rng2 = DeterministicRng::new(2222);

        let mut arr = [0, 1, 2, 3];
        rng1.shuffle(&mut arr);

        let mut expected = [0, 1, 2, 3];
        for i in (1..4usize).rev() {
            let j = rng2.next_int((i + 1) as u32) as usize;
            expected.swap(i, j);
        }

        assert_eq!(arr, expected);
    }

    #[test]
    fn test_from_entropy_produces_usable_rng() {
        let mut rng = DeterministicRng::from_entropy();
        assert!(rng.state() != [0, 0]);
        assert!(rng.next_int(10) < 10);
    }

    #[test]
    fn test_choose() {
        let mut rng = DeterministicRng::new(31);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn test_derive_round_seed() {
        let seed1 = derive_round_seed(99, 0);
        let seed2 = derive_round_seed(99, 0);

        // Same inputs = same seed
        assert_eq!(seed1, seed2);

        // Different round or session = different seed
        assert_ne!(seed1, derive_round_seed(99, 1));
        assert_ne!(seed1, derive_round_seed(100, 0));
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = DeterministicRng::new(5555);

        for _ in 0..50 {
            rng.next_u64();
        }

        let saved_state = rng.state();
        let next_values: Vec<u64> = (0..10).map(|_| rng.next_u64()).collect();

        rng.set_state(saved_state);

        for expected in next_values {
            assert_eq!(rng.next_u64(), expected);
        }
    }

    #[test]
    fn test_borrowed_source_advances_owner() {
        let mut owned = DeterministicRng::new(8);
        let mut reference = DeterministicRng::new(8);
        reference.next_u64();

        fn draw<R: RandomSource>(mut rng: R) -> u64 {
            rng.next_u64()
        }
        draw(&mut owned);

        assert_eq!(owned.next_u64(), reference.next_u64());
    }
}
