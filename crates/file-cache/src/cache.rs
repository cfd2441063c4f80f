//! Insertion-ordered cache of open dataset handles.

use lru::LruCache;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use egads_common::ToolboxConfig;

use crate::error::{CacheError, CacheResult, CloseFailure};
use crate::handle::{normalize_path, DatasetHandle, HandleError, OpenMode};
use crate::stats::CacheStats;

/// Default number of handles kept open.
pub const DEFAULT_FILE_LIMIT: usize = 1000;

struct CachedFile<H> {
    handle: H,
    ordinal: u64,
}

/// Pool of open dataset handles with first-in, first-out eviction.
///
/// Handles are only ever looked up with non-promoting accessors, so the
/// underlying LRU order is exactly insertion order: re-opening a cached path
/// returns the same handle without making it "newer". When a new path would
/// push the pool past `limit`, the oldest handle is closed and dropped.
///
/// The cache owns every handle from insertion until it is closed, evicted or
/// the cache is dropped. Callers must not close a handle themselves.
pub struct FileHandleCache<H: DatasetHandle> {
    entries: LruCache<PathBuf, CachedFile<H>>,
    limit: usize,
    counter: u64,
    stats: CacheStats,
}

impl<H: DatasetHandle> FileHandleCache<H> {
    /// Create a cache holding up to [`DEFAULT_FILE_LIMIT`] handles.
    pub fn new() -> Self {
        Self {
            entries: LruCache::unbounded(),
            limit: DEFAULT_FILE_LIMIT,
            counter: 0,
            stats: CacheStats::default(),
        }
    }

    /// Create a cache with a custom limit.
    pub fn with_limit(limit: usize) -> CacheResult<Self> {
        let mut cache = Self::new();
        cache.set_limit(limit)?;
        Ok(cache)
    }

    /// Create a cache sized from the toolbox configuration.
    pub fn from_config(config: &ToolboxConfig) -> CacheResult<Self> {
        Self::with_limit(config.file_cache_limit)
    }

    /// Open `path` for reading, reusing a cached handle when present.
    pub fn open<F>(&mut self, opener: F, path: impl AsRef<Path>) -> CacheResult<&mut H>
    where
        F: FnOnce(&Path, OpenMode) -> Result<H, HandleError>,
    {
        self.open_with_mode(opener, path, OpenMode::Read)
    }

    /// Open `path` with an explicit mode.
    ///
    /// A cached handle is returned as-is, whatever mode it was opened with.
    /// Otherwise the oldest handles are evicted until there is room, and
    /// `opener` is called with the normalised path.
    pub fn open_with_mode<F>(
        &mut self,
        opener: F,
        path: impl AsRef<Path>,
        mode: OpenMode,
    ) -> CacheResult<&mut H>
    where
        F: FnOnce(&Path, OpenMode) -> Result<H, HandleError>,
    {
        let key = normalize_path(path.as_ref());

        if self.entries.contains(&key) {
            self.stats.hits += 1;
            debug!(path = %key.display(), "File handle cache hit");
            return self.handle_mut(&key);
        }

        self.stats.misses += 1;
        debug!(path = %key.display(), mode = %mode, "Opening file");

        while self.entries.len() >= self.limit {
            if !self.evict_oldest() {
                break;
            }
        }

        let handle = opener(&key, mode).map_err(|err| CacheError::open_failed(&key, err))?;

        let ordinal = self.counter;
        self.counter += 1;
        self.stats.opens += 1;
        self.entries.put(key.clone(), CachedFile { handle, ordinal });

        self.handle_mut(&key)
    }

    /// Close and remove a single cached handle.
    ///
    /// The entry is removed even if its close action fails.
    pub fn close(&mut self, path: impl AsRef<Path>) -> CacheResult<()> {
        let key = normalize_path(path.as_ref());
        let mut entry = self
            .entries
            .pop(&key)
            .ok_or_else(|| CacheError::NotCached(key.clone()))?;

        debug!(path = %key.display(), "Closing cached file");
        entry
            .handle
            .close()
            .map_err(|err| CacheError::close_failed(&key, err))
    }

    /// Close every cached handle, oldest first.
    ///
    /// Every handle is attempted even if some fail; the failures are
    /// reported together afterwards.
    pub fn close_all(&mut self) -> CacheResult<()> {
        if !self.entries.is_empty() {
            info!(count = self.entries.len(), "Closing all cached files");
        }

        let mut failures = Vec::new();
        while let Some((path, mut entry)) = self.entries.pop_lru() {
            if let Err(err) = entry.handle.close() {
                error!(path = %path.display(), error = %err, "Failed to close cached file");
                failures.push(CloseFailure {
                    path,
                    message: err.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CacheError::CloseAllFailed(failures))
        }
    }

    /// Borrow a cached handle without opening anything.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&H> {
        self.entries
            .peek(&normalize_path(path.as_ref()))
            .map(|entry| &entry.handle)
    }

    /// Mutably borrow a cached handle without opening anything.
    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut H> {
        self.entries
            .peek_mut(&normalize_path(path.as_ref()))
            .map(|entry| &mut entry.handle)
    }

    /// Check if a path is cached.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains(&normalize_path(path.as_ref()))
    }

    /// Insertion ordinal of a cached path.
    pub fn ordinal(&self, path: impl AsRef<Path>) -> Option<u64> {
        self.entries
            .peek(&normalize_path(path.as_ref()))
            .map(|entry| entry.ordinal)
    }

    /// Cached paths, oldest first.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut ordered: Vec<(u64, &PathBuf)> = self
            .entries
            .iter()
            .map(|(path, entry)| (entry.ordinal, path))
            .collect();
        ordered.sort_unstable_by_key(|(ordinal, _)| *ordinal);
        ordered.into_iter().map(|(_, path)| path.clone()).collect()
    }

    /// Get the number of cached handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the maximum number of cached handles.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit.
    ///
    /// Lowering it below the current size does not evict anything now; the
    /// next insertion trims the cache down.
    pub fn set_limit(&mut self, limit: usize) -> CacheResult<()> {
        if limit == 0 {
            return Err(CacheError::InvalidLimit(limit));
        }
        self.limit = limit;
        Ok(())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }

    fn handle_mut(&mut self, key: &Path) -> CacheResult<&mut H> {
        self.entries
            .peek_mut(key)
            .map(|entry| &mut entry.handle)
            .ok_or_else(|| CacheError::NotCached(key.to_path_buf()))
    }

    /// Close and drop the oldest handle. Returns false when empty.
    fn evict_oldest(&mut self) -> bool {
        let Some((path, mut entry)) = self.entries.pop_lru() else {
            return false;
        };

        info!(
            path = %path.display(),
            ordinal = entry.ordinal,
            limit = self.limit,
            "Hit limit, closing oldest file"
        );
        if let Err(err) = entry.handle.close() {
            error!(path = %path.display(), error = %err, "Failed to close evicted file");
        }
        self.stats.evictions += 1;
        true
    }
}

impl<H: DatasetHandle> Default for FileHandleCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DatasetHandle> Drop for FileHandleCache<H> {
    fn drop(&mut self) {
        if let Err(err) = self.close_all() {
            warn!(error = %err, "File handle cache dropped with close failures");
        }
    }
}
