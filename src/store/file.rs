//! Durable JSON-file position store.
//!
//! Persists the whole position map as one flat `{id: {x, y}}` JSON blob at a
//! caller-chosen path — the file path is the well-known storage key, so a
//! future schema change can namespace itself by picking a new path.
//!
//! Corruption recovery: an unparsable blob is treated as an empty store (the
//! current session regenerates positions), and the next `set` rewrites the
//! whole blob, self-healing the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::PositionStore;
use crate::Result;
use crate::model::{Coordinate, UserId};

/// Position store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<HashMap<UserId, Coordinate>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing blob.
    ///
    /// A missing file starts empty; an unparsable one is discarded with a
    /// warning and also starts empty. Only genuine I/O failures (permission
    /// errors and the like) are surfaced.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let cache = match std::fs::read_to_string(&path) {
            Ok(blob) => match serde_json::from_str::<HashMap<UserId, Coordinate>>(&blob) {
                Ok(map) => {
                    debug!(entries = map.len(), path = %path.display(), "loaded position blob");
                    map
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "position blob unparsable, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, cache: RwLock::new(cache) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Rewrite the whole blob from the in-memory map. Callers hold the cache
    /// lock, so blob writes never interleave.
    fn flush(&self, map: &HashMap<UserId, Coordinate>) -> Result<()> {
        let blob = serde_json::to_string(map)?;
        std::fs::write(&self.path, blob)?;
        Ok(())
    }
}

impl PositionStore for JsonFileStore {
    fn get(&self, id: &UserId) -> Option<Coordinate> {
        self.cache.read().get(id).copied()
    }

    fn set(&self, id: &UserId, position: Coordinate) -> Result<()> {
        let mut map = self.cache.write();
        map.insert(id.clone(), position);
        self.flush(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.cache.write();
        map.clear();
        self.flush(&map)
    }
}
