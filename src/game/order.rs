//! Order Generation
//!
//! Builds one round's order and packed box. All randomness comes from the
//! caller's [`RandomSource`], consumed in a fixed sequence:
//!
//! 1. one catalog draw per ordered item
//! 2. the round's `chance` roll
//! 3. if deviating: `amount_wrong`, then per deviating position an optional
//!    omission roll ([`DeviationMode::IndependentDraws`] only) and a
//!    catalog draw for each substitute
//! 4. the Fisher-Yates shuffle of the presentation copy
//!
//! Given the same config, catalog and seed, the resulting [`Order`] is
//! identical on every platform.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::core::hash::{compute_order_hash, OrderHash};
use crate::core::rng::RandomSource;
use crate::game::item::{Complexity, Item, ItemCatalog, ItemId};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// How omission vs substitution is decided for each deviating position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationMode {
    /// Compare the round's single `chance` roll against the missing-item
    /// chance. Every deviating position in a round is then either omitted or
    /// substituted, never a mix.
    #[default]
    SharedDraw,
    /// Roll separately for each deviating position.
    IndependentDraws,
}

/// Difficulty parameters for one order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Number of items on the order. At least 1.
    pub order_size: u32,
    /// Catalog tier items are drawn from.
    pub item_complexity: Complexity,
    /// Probability in [0, 1] that the box deviates from the order.
    pub incorrect_item_chance: f64,
    /// Probability in [0, 1] that a deviation omits rather than substitutes.
    pub missing_item_chance: f64,
    /// Omission decision strategy.
    pub deviation_mode: DeviationMode,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            order_size: 3,
            item_complexity: Complexity(0),
            incorrect_item_chance: 0.5,
            missing_item_chance: 0.25,
            deviation_mode: DeviationMode::SharedDraw,
        }
    }
}

impl OrderConfig {
    /// Check the config against a catalog.
    pub fn validate(&self, catalog: &ItemCatalog) -> Result<(), ConfigError> {
        if self.order_size == 0 {
            return Err(ConfigError::InvalidOrderSize(self.order_size));
        }
        check_probability("incorrect_item_chance", self.incorrect_item_chance)?;
        check_probability("missing_item_chance", self.missing_item_chance)?;
        if catalog.pool(self.item_complexity).is_none() {
            return Err(ConfigError::UnknownComplexity {
                tier: self.item_complexity.0,
                available: catalog.tier_count(),
            });
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

/// A roll hits when it is at or below the probability. A probability of
/// exactly zero never hits.
#[inline]
fn roll_hits(roll: f64, probability: f64) -> bool {
    probability > 0.0 && roll <= probability
}

// =============================================================================
// ORDER
// =============================================================================

/// What the deviation branch did to the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    /// Positions replaced by a fresh draw. A substitute may coincide with
    /// the original.
    pub substituted: u32,
    /// Positions left out of the box.
    pub omitted: u32,
}

impl Deviation {
    /// Number of leading positions the deviation touched.
    pub fn amount_wrong(&self) -> u32 {
        self.substituted + self.omitted
    }
}

/// The player's answer to "does the box match the order?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The box matches the order.
    Matches,
    /// The box does not match the order.
    DoesNotMatch,
}

impl Verdict {
    /// Verdict from a yes/no answer.
    pub fn from_answer(box_matches: bool) -> Self {
        if box_matches {
            Verdict::Matches
        } else {
            Verdict::DoesNotMatch
        }
    }
}

/// One round's order and packed box.
///
/// Immutable once generated: the correctness flag and the shuffled copy are
/// derived during construction and cannot drift from the item lists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Order {
    ordered: Vec<Item>,
    packed: Vec<Item>,
    packed_shuffled: Vec<Item>,
    correctly_packed: bool,
    deviation: Option<Deviation>,
}

impl Order {
    /// Items the customer asked for, in order.
    pub fn ordered(&self) -> &[Item] {
        &self.ordered
    }

    /// Items in the box, in packing order.
    pub fn packed(&self) -> &[Item] {
        &self.packed
    }

    /// The packed items in presentation order.
    pub fn packed_shuffled(&self) -> &[Item] {
        &self.packed_shuffled
    }

    /// Whether the box matches the order item for item.
    pub fn is_correctly_packed(&self) -> bool {
        self.correctly_packed
    }

    /// Deviation applied, or `None` if the box was packed straight from the
    /// order.
    pub fn deviation(&self) -> Option<Deviation> {
        self.deviation
    }

    /// Ordered codes joined with `-`.
    pub fn ordered_codes(&self) -> String {
        join_codes(&self.ordered)
    }

    /// Packed codes joined with `-`.
    pub fn packed_codes(&self) -> String {
        join_codes(&self.packed)
    }

    /// Whether a player's verdict is right.
    pub fn grade(&self, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Matches => self.correctly_packed,
            Verdict::DoesNotMatch => !self.correctly_packed,
        }
    }

    /// Fingerprint of the full order.
    pub fn compute_hash(&self) -> OrderHash {
        compute_order_hash(self)
    }
}

fn join_codes(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| item.code().to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Element-wise comparison of item codes: same length, same code at every
/// position. Item identity is ignored.
pub fn codes_match(expected: &[Item], actual: &[Item]) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(a, b)| a.code() == b.code())
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate one order.
///
/// Fails only on invalid configuration; generation itself cannot fail.
pub fn generate_order<R: RandomSource>(
    config: &OrderConfig,
    catalog: &ItemCatalog,
    rng: &mut R,
) -> Result<Order, ConfigError> {
    config.validate(catalog)?;
    let pool = catalog
        .pool(config.item_complexity)
        .ok_or(ConfigError::UnknownComplexity {
            tier: config.item_complexity.0,
            available: catalog.tier_count(),
        })?;

    // 1. Fill the order
    let ordered: Vec<Item> = (0..config.order_size)
        .map(|i| pool.create_item(ItemId(i), rng))
        .collect();

    // 2. Pack the box
    let chance = rng.next_unit();
    let (packed, deviation) = if roll_hits(chance, config.incorrect_item_chance) {
        let amount_wrong = rng.next_int_inclusive(1, config.order_size);
        let mut next_id = config.order_size;
        let mut packed = Vec::with_capacity(ordered.len());
        let mut deviation = Deviation { substituted: 0, omitted: 0 };

        for (position, item) in (1..).zip(ordered.iter()) {
            if position > amount_wrong {
                packed.push(*item);
                continue;
            }

            let omit = match config.deviation_mode {
                DeviationMode::SharedDraw => roll_hits(chance, config.missing_item_chance),
                DeviationMode::IndependentDraws => {
                    roll_hits(rng.next_unit(), config.missing_item_chance)
                }
            };

            if omit {
                deviation.omitted += 1;
            } else {
                packed.push(pool.create_item(ItemId(next_id), rng));
                next_id += 1;
                deviation.substituted += 1;
            }
        }

        debug!(
            chance,
            amount_wrong,
            substituted = deviation.substituted,
            omitted = deviation.omitted,
            "box deviates from order"
        );
        (packed, Some(deviation))
    } else {
        debug!(chance, "box packed from order");
        (ordered.clone(), None)
    };

    // 3. Grade and shuffle
    let correctly_packed = codes_match(&ordered, &packed);
    let mut packed_shuffled = packed.clone();
    rng.shuffle(&mut packed_shuffled);

    Ok(Order {
        ordered,
        packed,
        packed_shuffled,
        correctly_packed,
        deviation,
    })
}
