//! Item Catalog
//!
//! Items are drawn uniformly from a pool selected by complexity tier. Higher
//! tiers hold every lower-tier item plus look-alikes, so a harder round has
//! more ways for a substitute to slip past the player.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::config::ConfigError;
use crate::core::rng::RandomSource;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Catalog code of an item kind. Two items are "the same item" for grading
/// purposes exactly when their codes are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(pub u16);

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Complexity tier, an index into [`ItemCatalog`] pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Complexity(pub u8);

/// Identity of an item within one order.
///
/// Ordered items are numbered from 0; substitutes continue after them. An
/// item reused unchanged in the packed box keeps its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

// =============================================================================
// ITEM
// =============================================================================

/// A single item on an order or in a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    code: ItemCode,
    complexity: Complexity,
}

impl Item {
    /// Create an item.
    pub const fn new(id: ItemId, code: ItemCode, complexity: Complexity) -> Self {
        Self { id, code, complexity }
    }

    /// Identity within the owning order.
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Catalog code.
    #[inline]
    pub fn code(&self) -> ItemCode {
        self.code
    }

    /// Tier the item was drawn from.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        self.complexity
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// A named item kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Code compared when grading.
    pub code: ItemCode,
    /// Display name.
    pub name: String,
}

impl CatalogEntry {
    fn new(code: u16, name: &str) -> Self {
        Self {
            code: ItemCode(code),
            name: name.to_string(),
        }
    }
}

/// The items eligible at one complexity tier. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemPool {
    tier: Complexity,
    entries: Vec<CatalogEntry>,
}

impl ItemPool {
    /// Tier this pool serves.
    pub fn tier(&self) -> Complexity {
        self.tier
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Draw an item uniformly from this pool.
    pub fn create_item<R: RandomSource>(&self, id: ItemId, rng: &mut R) -> Item {
        // len >= 1 is enforced by ItemCatalog::new
        let idx = rng.next_int(self.entries.len() as u32) as usize;
        Item::new(id, self.entries[idx].code, self.tier)
    }
}

/// Serialized form of a catalog tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TierDef {
    items: Vec<CatalogEntry>,
}

/// Serialized form of a catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CatalogDef {
    tiers: Vec<TierDef>,
}

/// All item pools, indexed by [`Complexity`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDef", into = "CatalogDef")]
pub struct ItemCatalog {
    tiers: Vec<ItemPool>,
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ItemCatalog {
    /// Build a catalog from per-tier entry lists.
    ///
    /// Every tier must be non-empty and free of duplicate codes.
    pub fn new(tiers: Vec<Vec<CatalogEntry>>) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if tiers.len() > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManyTiers(tiers.len()));
        }

        let mut pools = Vec::with_capacity(tiers.len());
        for (index, entries) in tiers.into_iter().enumerate() {
            let tier = Complexity(index as u8);
            if entries.is_empty() {
                return Err(ConfigError::EmptyTier(tier.0));
            }

            let mut seen = BTreeSet::new();
            for entry in &entries {
                if !seen.insert(entry.code) {
                    return Err(ConfigError::DuplicateCode { tier: tier.0, code: entry.code });
                }
            }

            pools.push(ItemPool { tier, entries });
        }

        Ok(Self { tiers: pools })
    }

    /// The built-in three-tier catalog.
    ///
    /// | Tier | Items |
    /// |------|-------|
    /// | 0 | Mug, Book, Sock, Lamp |
    /// | 1 | tier 0 + Teapot, Notebook, Glove, Torch |
    /// | 2 | tier 1 + Tea Cup, Diary, Mitten, Candle |
    pub fn standard() -> Self {
        let basic = vec![
            CatalogEntry::new(1, "Mug"),
            CatalogEntry::new(2, "Book"),
            CatalogEntry::new(3, "Sock"),
            CatalogEntry::new(4, "Lamp"),
        ];
        let mut standard = basic.clone();
        standard.extend([
            CatalogEntry::new(5, "Teapot"),
            CatalogEntry::new(6, "Notebook"),
            CatalogEntry::new(7, "Glove"),
            CatalogEntry::new(8, "Torch"),
        ]);
        let mut advanced = standard.clone();
        advanced.extend([
            CatalogEntry::new(9, "Tea Cup"),
            CatalogEntry::new(10, "Diary"),
            CatalogEntry::new(11, "Mitten"),
            CatalogEntry::new(12, "Candle"),
        ]);

        let tiers = [basic, standard, advanced]
            .into_iter()
            .enumerate()
            .map(|(index, entries)| ItemPool {
                tier: Complexity(index as u8),
                entries,
            })
            .collect();

        Self { tiers }
    }

    /// Number of tiers.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Pool for a tier, if the tier exists.
    pub fn pool(&self, complexity: Complexity) -> Option<&ItemPool> {
        self.tiers.get(complexity.0 as usize)
    }

    /// Draw an item at the given tier. `None` for an unknown tier.
    pub fn create_item<R: RandomSource>(
        &self,
        complexity: Complexity,
        id: ItemId,
        rng: &mut R,
    ) -> Option<Item> {
        self.pool(complexity).map(|pool| pool.create_item(id, rng))
    }

    /// Look up a code in any tier.
    pub fn entry(&self, code: ItemCode) -> Option<&CatalogEntry> {
        self.tiers
            .iter()
            .flat_map(|pool| pool.entries.iter())
            .find(|entry| entry.code == code)
    }

    /// Display name for a code, falling back to the code itself.
    pub fn display_name(&self, code: ItemCode) -> String {
        match self.entry(code) {
            Some(entry) => entry.name.clone(),
            None => format!("#{}", code),
        }
    }
}

impl TryFrom<CatalogDef> for ItemCatalog {
    type Error = ConfigError;

    fn try_from(def: CatalogDef) -> Result<Self, Self::Error> {
        Self::new(def.tiers.into_iter().map(|tier| tier.items).collect())
    }
}

impl From<ItemCatalog> for CatalogDef {
    fn from(catalog: ItemCatalog) -> Self {
        Self {
            tiers: catalog
                .tiers
                .into_iter()
                .map(|pool| TierDef { items: pool.entries })
                .collect(),
        }
    }
}
