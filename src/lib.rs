//! # Terms and Conditions
//!
//! Order generation for a packing game: the player sees an order and a
//! packed box and decides whether the box matches.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TERMS AND CONDITIONS                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - RandomSource, Xorshift128+ PRNG           │
//! │  └── hash.rs     - Order fingerprints                        │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── item.rs     - Item catalog and complexity tiers         │
//! │  ├── order.rs    - Order / packed box generation, grading    │
//! │  └── session.rs  - Round dealing and scoring                 │
//! │                                                              │
//! │  config.rs       - TOML configuration                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use terms_conditions::{generate_order, DeterministicRng, ItemCatalog, OrderConfig, Verdict};
//!
//! let catalog = ItemCatalog::standard();
//! let mut rng = DeterministicRng::new(7);
//! let order = generate_order(&OrderConfig::default(), &catalog, &mut rng).unwrap();
//!
//! assert_eq!(order.ordered().len(), 3);
//! assert!(order.packed().len() <= order.ordered().len());
//! assert!(order.grade(Verdict::from_answer(order.is_correctly_packed())));
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given identical config, catalog and RNG seed, generation produces
//! **identical orders** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, SessionConfig};
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use game::item::{Complexity, Item, ItemCatalog, ItemCode, ItemId};
pub use game::order::{generate_order, Deviation, DeviationMode, Order, OrderConfig, Verdict};
pub use game::session::{PackingSession, RoundOutcome, SessionError, SessionStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
