//! Core deterministic primitives.
//!
//! Randomness and hashing shared by the game modules. Nothing here touches
//! the clock or global state.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, RandomSource, derive_round_seed};
pub use hash::{OrderHash, OrderHasher, compute_order_hash};
