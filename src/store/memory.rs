//! In-memory position store.
//!
//! This is the reference implementation of `PositionStore`. Positions live
//! only for the lifetime of the process, which is exactly what a server-side
//! port or a test harness wants.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use super::PositionStore;
use crate::Result;
use crate::model::{Coordinate, UserId};

/// Process-lifetime position store. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<UserId, Coordinate>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached positions.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, id: &UserId) -> Option<Coordinate> {
        self.inner.read().get(id).copied()
    }

    fn set(&self, id: &UserId, position: Coordinate) -> Result<()> {
        self.inner.write().insert(id.clone(), position);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.inner.write().clear();
        Ok(())
    }
}
