//! Order Hashing
//!
//! SHA-256 fingerprint of a generated order, used to log rounds compactly
//! and to check that a replayed session produced the same boxes.

use sha2::{Sha256, Digest};

use crate::game::item::Item;
use crate::game::order::Order;

/// Hash output type (256 bits / 32 bytes)
pub type OrderHash = [u8; 32];

/// Deterministic hasher for order contents.
///
/// Order of updates is critical for determinism.
pub struct OrderHasher {
    hasher: Sha256,
}

impl OrderHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for orders.
    pub fn for_order() -> Self {
        Self::new(b"TERMS_CONDITIONS_ORDER_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u16 value (little-endian).
    #[inline]
    pub fn update_u16(&mut self, value: u16) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a length-prefixed item list.
    pub fn update_items(&mut self, items: &[Item]) {
        self.update_u32(items.len() as u32);
        for item in items {
            self.update_u32(item.id().0);
            self.update_u16(item.code().0);
            self.update_u8(item.complexity().0);
        }
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> OrderHash {
        self.hasher.finalize().into()
    }
}

/// Compute the fingerprint of an order.
///
/// Covers all three item lists (ids included) and the correctness flag.
pub fn compute_order_hash(order: &Order) -> OrderHash {
    let mut hasher = OrderHasher::for_order();
    hasher.update_items(order.ordered());
    hasher.update_items(order.packed());
    hasher.update_items(order.packed_shuffled());
    hasher.update_bool(order.is_correctly_packed());
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
