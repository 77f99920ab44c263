//! # Position Store
//!
//! The contract between the layout assigner and whatever durable storage the
//! client platform offers. A store is a flat `id → coordinate` map with no
//! expiry: cardinality is bounded by a person's social graph, so entries
//! live until an external clear-storage action.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing / server-side ports |
//! | `JsonFileStore` | `file` | Durable single-blob JSON file |

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::Result;
use crate::model::{Coordinate, UserId};

/// The durable position contract.
///
/// Stores are monotonic: entries are only added or overwritten, never
/// read-modify-written, so concurrent lookups need no coordination beyond
/// what the implementation's own interior mutability provides.
pub trait PositionStore: Send + Sync {
    /// Look up a previously generated coordinate. Never mutates the store.
    fn get(&self, id: &UserId) -> Option<Coordinate>;

    /// Record a coordinate, overwriting any existing entry unconditionally.
    fn set(&self, id: &UserId, position: Coordinate) -> Result<()>;

    /// Drop every entry. Models the external clear-storage action; the next
    /// layout pass regenerates all positions.
    fn clear(&self) -> Result<()>;
}
