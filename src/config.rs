//! Game Configuration
//!
//! Difficulty, session and catalog settings, loadable from TOML. Every
//! section is optional and falls back to its default.
//!
//! ```
//! use terms_conditions::config::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     [order]
//!     order_size = 5
//!     item_complexity = 1
//!     incorrect_item_chance = 0.6
//!     missing_item_chance = 0.2
//!
//!     [session]
//!     seed = 7
//!     rounds = 10
//! "#).unwrap();
//!
//! assert_eq!(config.order.order_size, 5);
//! assert_eq!(config.session.rounds, 10);
//! ```

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::game::item::{ItemCatalog, ItemCode};
use crate::game::order::OrderConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`GameConfig`].
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Order size must be at least 1.
    #[error("order_size must be at least 1, got {0}")]
    InvalidOrderSize(u32),

    /// A probability is NaN or outside [0, 1].
    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The configured tier does not exist in the catalog.
    #[error("unknown item complexity tier {tier} (catalog has {available} tiers)")]
    UnknownComplexity {
        /// Requested tier.
        tier: u8,
        /// Number of tiers in the catalog.
        available: usize,
    },

    /// Catalog has no tiers.
    #[error("item catalog has no tiers")]
    EmptyCatalog,

    /// Catalog has more tiers than [`Complexity`](crate::game::item::Complexity) can index.
    #[error("item catalog has {0} tiers, at most 256 are supported")]
    TooManyTiers(usize),

    /// A tier has no items.
    #[error("complexity tier {0} has no items")]
    EmptyTier(u8),

    /// The same code appears twice in one tier.
    #[error("item code {code} appears twice in tier {tier}")]
    DuplicateCode {
        /// Tier containing the duplicate.
        tier: u8,
        /// Duplicated code.
        code: ItemCode,
    },
}

/// Session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for reproducible sessions. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Rounds per session. 0 means unlimited.
    pub rounds: u32,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Per-order difficulty.
    pub order: OrderConfig,
    /// Session settings.
    pub session: SessionConfig,
    /// Item pools.
    pub catalog: ItemCatalog,
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the order settings against the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.order.validate(&self.catalog)
    }
}
