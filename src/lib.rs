//! Quran Search - full-text search over the Quran and its translations
//!
//! Merges the Arabic text with English, Pashto and Dari translations into one
//! record per verse and answers translation-scoped queries over a lazily built
//! Tantivy index.

// Ordered by dependency: corpus and text handling first, the HTTP host last
pub mod error;
pub mod corpus;
pub mod loader;
pub mod analysis;
pub mod search;
pub mod cache;
pub mod config;
pub mod state;
pub mod api;

pub use cache::{QueryCache, QueryKey};
pub use config::AppConfig;
pub use corpus::{
    merge_corpora, BaseCorpus, BaseVerse, MergedCorpus, TranslationCorpora, TranslationCorpus, TranslationEntry,
    VerseRecord,
};
pub use error::QuranSearchError;
pub use loader::load_corpora;
pub use search::{Language, RankedHit, ScoredVerse, SearchFilters, SearchIndex, SearchResults};
pub use state::AppState;
