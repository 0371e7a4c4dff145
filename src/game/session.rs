//! Packing Session
//!
//! Deals one order per round and keeps score. Each round draws from its own
//! generator seeded by [`derive_round_seed`], so any round of a session can
//! be regenerated from the session seed and round number alone.

use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::core::hash::OrderHash;
use crate::core::rng::{derive_round_seed, DeterministicRng, RandomSource};
use crate::game::item::ItemCatalog;
use crate::game::order::{generate_order, Order, OrderConfig, Verdict};

/// Unique session identifier.
pub type SessionId = [u8; 16];

/// Result of grading one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Round number, starting at 0.
    pub round: u32,
    /// What the player answered.
    pub verdict: Verdict,
    /// Whether the box actually matched.
    pub correctly_packed: bool,
    /// Whether the answer was right.
    pub player_was_right: bool,
    /// Fingerprint of the graded order.
    pub order_hash: OrderHash,
}

/// Running score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Rounds answered.
    pub rounds_played: u32,
    /// Right answers.
    pub correct_answers: u32,
    /// Wrong answers.
    pub wrong_answers: u32,
}

impl SessionStats {
    /// Fraction of right answers, 0.0 before the first round.
    pub fn accuracy(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.rounds_played as f64
        }
    }
}

/// Session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No order has been dealt for the current round.
    #[error("No active order")]
    NoActiveOrder,

    /// The current order has not been answered yet.
    #[error("Order pending an answer")]
    OrderPending,

    /// Every configured round has been played.
    #[error("Session complete")]
    SessionComplete,

    /// Configuration rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A player's run of rounds.
pub struct PackingSession {
    id: SessionId,
    seed: u64,
    order_config: OrderConfig,
    catalog: ItemCatalog,
    rounds: u32,
    round: u32,
    current: Option<Order>,
    stats: SessionStats,
}

impl PackingSession {
    /// Create a session from validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let id = uuid::Uuid::new_v4().into_bytes();
        let seed = config
            .session
            .seed
            .unwrap_or_else(|| DeterministicRng::from_entropy().next_u64());

        info!(
            session = %hex::encode(&id[..4]),
            seed,
            rounds = config.session.rounds,
            "Packing session created"
        );

        Ok(Self {
            id,
            seed,
            order_config: config.order,
            catalog: config.catalog,
            rounds: config.session.rounds,
            round: 0,
            current: None,
            stats: SessionStats::default(),
        })
    }

    /// Session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Seed every round is derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current round number.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Score so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Catalog used for this session, for display names.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Difficulty for upcoming rounds.
    pub fn order_config(&self) -> &OrderConfig {
        &self.order_config
    }

    /// The dealt order awaiting an answer.
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    /// Whether all configured rounds have been played.
    pub fn is_complete(&self) -> bool {
        self.rounds != 0 && self.round >= self.rounds
    }

    /// Change difficulty between rounds.
    pub fn tune(&mut self, config: OrderConfig) -> Result<(), SessionError> {
        if self.current.is_some() {
            warn!(round = self.round, "Difficulty change rejected while order pending");
            return Err(SessionError::OrderPending);
        }
        config.validate(&self.catalog)?;
        self.order_config = config;
        Ok(())
    }

    /// Deal the next round's order.
    pub fn deal(&mut self) -> Result<&Order, SessionError> {
        if self.current.is_some() {
            warn!(round = self.round, "Deal requested while order pending");
            return Err(SessionError::OrderPending);
        }
        if self.is_complete() {
            return Err(SessionError::SessionComplete);
        }

        let order = self.regenerate(self.round)?;
        info!(
            round = self.round,
            items = order.ordered().len(),
            packed = order.packed().len(),
            "Round dealt"
        );

        Ok(self.current.insert(order))
    }

    /// Answer the current order.
    pub fn submit(&mut self, verdict: Verdict) -> Result<RoundOutcome, SessionError> {
        let order = match self.current.take() {
            Some(order) => order,
            None => {
                warn!(round = self.round, "Answer submitted with no active order");
                return Err(SessionError::NoActiveOrder);
            }
        };

        let player_was_right = order.grade(verdict);
        let outcome = RoundOutcome {
            round: self.round,
            verdict,
            correctly_packed: order.is_correctly_packed(),
            player_was_right,
            order_hash: order.compute_hash(),
        };

        self.stats.rounds_played += 1;
        if player_was_right {
            self.stats.correct_answers += 1;
        } else {
            self.stats.wrong_answers += 1;
        }
        self.round += 1;

        info!(
            round = outcome.round,
            ?verdict,
            correctly_packed = outcome.correctly_packed,
            player_was_right,
            "Round graded"
        );

        Ok(outcome)
    }

    /// Rebuild the order for any round with the current difficulty.
    pub fn regenerate(&self, round: u32) -> Result<Order, ConfigError> {
        let mut rng = DeterministicRng::new(derive_round_seed(self.seed, round));
        generate_order(&self.order_config, &self.catalog, &mut rng)
    }
}
