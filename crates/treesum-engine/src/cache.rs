use std::collections::HashMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::EngineError;

/// A memoizing lstat cache with periodic wholesale invalidation.
///
/// The first lookup for a path performs a real `symlink_metadata` call
/// (never following symlinks) and stores the result; later lookups within
/// the same flush window return the stored value without a syscall. A
/// background task owned by the cache clears the entire map at a fixed
/// interval, unconditionally. This is not an LRU: correctness only needs
/// consistency within one tree enumeration, and a flush mid-walk merely
/// means the next lookup re-stats.
///
/// Failed lookups are returned to the caller and never cached, so a
/// missing path fails every time it is asked for.
#[derive(Debug)]
pub struct StatCache {
    entries: Arc<Mutex<HashMap<PathBuf, Metadata>>>,
    flusher: JoinHandle<()>,
}

impl StatCache {
    /// Default flush interval.
    pub const DEFAULT_FLUSH: Duration = Duration::from_millis(1000);

    /// Create a cache whose flush task ticks every `flush_interval`.
    ///
    /// Must be called from within a tokio runtime; the flush task is
    /// aborted when the cache is dropped.
    pub fn new(flush_interval: Duration) -> Self {
        let entries: Arc<Mutex<HashMap<PathBuf, Metadata>>> = Arc::default();
        let map = Arc::clone(&entries);
        let flusher = tokio::spawn(async move {
            let mut tick = tokio::time::interval(flush_interval);
            // The first tick fires immediately; skip it so a fresh cache
            // gets a full window before the first flush.
            tick.tick().await;
            loop {
                tick.tick().await;
                map.lock().await.clear();
            }
        });
        Self { entries, flusher }
    }

    /// Look up a path's metadata, via the cache when possible.
    pub async fn stat(&self, path: &Path) -> Result<Metadata, EngineError> {
        if let Some(md) = self.entries.lock().await.get(path) {
            return Ok(md.clone());
        }
        let md = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| EngineError::io("stat", path, e))?;
        self.entries
            .lock()
            .await
            .insert(path.to_owned(), md.clone());
        Ok(md)
    }

    /// Number of cached entries (for tests and diagnostics).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache currently holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Drop for StatCache {
    fn drop(&mut self) {
        self.flusher.abort();
    }
}
