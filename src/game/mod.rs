//! Game Logic Module
//!
//! ## Module Structure
//!
//! - `item`: Item catalog and complexity tiers
//! - `order`: Order and packed-box generation, grading
//! - `session`: Round dealing and scoring

pub mod item;
pub mod order;
pub mod session;

// Re-export key types
pub use item::{CatalogEntry, Complexity, Item, ItemCatalog, ItemCode, ItemId, ItemPool};
pub use order::{codes_match, generate_order, Deviation, DeviationMode, Order, OrderConfig, Verdict};
pub use session::{PackingSession, RoundOutcome, SessionError, SessionStats};
