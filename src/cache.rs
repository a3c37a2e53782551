//! Search result caching with LRU eviction

use crate::search::{Language, RankedHit, SearchFilters};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct QueryKey {
    pub language: Language,
    pub query: String,
    pub filters: SearchFilters,
}

impl QueryKey {
    pub fn new(language: Language, query: &str, filters: SearchFilters) -> Self {
        Self { language, query: query.trim().to_string(), filters }
    }
}

/// Ranked hit lists of recent queries.
pub struct QueryCache {
    cache: Mutex<LruCache<QueryKey, Arc<Vec<RankedHit>>>>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        let cache = LruCache::new(NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY));
        Self { cache: Mutex::new(cache) }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<QueryKey, Arc<Vec<RankedHit>>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &QueryKey) -> Option<Arc<Vec<RankedHit>>> {
        self.lock().get(key).map(Arc::clone)
    }

    pub fn put(&self, key: QueryKey, hits: Arc<Vec<RankedHit>>) {
        self.lock().put(key, hits);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// (entries, capacity)
    pub fn stats(&self) -> (usize, usize) {
        let cache = self.lock();
        (cache.len(), cache.cap().get())
    }
}
