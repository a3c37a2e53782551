//! Application state management

use crate::cache::{QueryCache, QueryKey};
use crate::config::AppConfig;
use crate::corpus::MergedCorpus;
use crate::error::Result;
use crate::search::{Language, RankedHit, SearchFilters, SearchIndex};
use std::sync::Arc;
use tracing::info;

/// Shared state of the HTTP host: the lazily built index and a cache of recent queries.
pub struct AppState {
    pub search_index: Arc<SearchIndex>,
    pub query_cache: QueryCache,
}

impl AppState {
    /// Load the corpora from the configured data directory.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let corpus = MergedCorpus::load(&config.data_dir)?;
        let state = Self::from_corpus(corpus, config.cache_capacity);
        if config.warm_index {
            info!("Warming search index");
            state.search_index.ensure_built().await?;
        }
        Ok(state)
    }

    pub fn from_corpus(corpus: MergedCorpus, cache_capacity: usize) -> Self {
        Self {
            search_index: Arc::new(SearchIndex::new(Arc::new(corpus))),
            query_cache: QueryCache::new(cache_capacity),
        }
    }

    pub fn corpus(&self) -> &MergedCorpus {
        self.search_index.corpus()
    }

    /// Ranked hits for a query, served from the cache when possible.
    pub async fn ranked(&self, query: &str, language: Language, filters: SearchFilters) -> Result<Arc<Vec<RankedHit>>> {
        let key = QueryKey::new(language, query, filters);
        if let Some(hits) = self.query_cache.get(&key) {
            return Ok(hits);
        }

        let hits = Arc::new(self.search_index.ranked(query, language, &filters).await?);
        self.query_cache.put(key, Arc::clone(&hits));
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::VerseRecord;

    fn corpus() -> MergedCorpus {
        MergedCorpus::from_records(vec![VerseRecord {
            id: 1,
            surah: 1,
            ayah: 1,
            verse: "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ".to_string(),
            translation_en: "In the name of Allah, the Most Gracious, the Most Merciful".to_string(),
            translation_ps: String::new(),
            translation_dr: String::new(),
        }])
    }

    #[tokio::test]
    async fn test_ranked_results_are_cached() {
        let state = AppState::from_corpus(corpus(), 8);
        let first = state.ranked("gracious", Language::En, SearchFilters::default()).await.unwrap();
        let second = state.ranked("gracious", Language::En, SearchFilters::default()).await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(state.query_cache.stats().0, 1);
        assert_eq!(state.search_index.build_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_data_dir_fails() {
        let config = AppConfig { data_dir: "/nonexistent/quran-data".into(), ..AppConfig::default() };
        assert!(AppState::new(&config).await.is_err());
    }
}
