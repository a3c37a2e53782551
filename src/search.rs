//! Search functionality using Tantivy
//!
//! The index is built in RAM on first use and never rebuilt. Each indexed
//! document carries the logical verse id; hits are resolved back to the
//! merged corpus through its id map.

use crate::analysis::{analyze, normalize_text, register_analyzers, ENGLISH_ANALYZER, VERSE_TEXT_ANALYZER};
use crate::corpus::{MergedCorpus, VerseRecord};
use crate::error::{QuranSearchError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, INDEXED, STORED,
};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info};

const WRITER_MEMORY_BUDGET: usize = 50_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ps,
    Dr,
}

impl Language {
    /// Accepts the short codes and the long names stored by the reader's language preference.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "ps" | "pashto" => Some(Language::Ps),
            "dr" | "dari" => Some(Language::Dr),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ps => "ps",
            Language::Dr => "dr",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            Language::En => "translation_en",
            Language::Ps => "translation_ps",
            Language::Dr => "translation_dr",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchFilters {
    pub surah: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedHit {
    pub id: u64,
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct ScoredVerse<'a> {
    pub score: f32,
    #[serde(flatten)]
    pub verse: &'a VerseRecord,
}

#[derive(Debug, Serialize)]
pub struct SearchResults<'a> {
    pub query: String,
    pub language: String,
    pub total_hits: usize,
    pub hits: Vec<ScoredVerse<'a>>,
    pub elapsed_ms: u64,
}

impl<'a> SearchResults<'a> {
    /// Resolve one page of a ranked hit list against the corpus.
    pub fn page(
        corpus: &'a MergedCorpus,
        query: &str,
        language: &str,
        ranked: &[RankedHit],
        limit: usize,
        offset: usize,
        started: Instant,
    ) -> Self {
        let hits = ranked
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|hit| corpus.by_id(hit.id).map(|verse| ScoredVerse { score: hit.score, verse }))
            .collect();

        Self {
            query: query.to_string(),
            language: language.to_string(),
            total_hits: ranked.len(),
            hits,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

struct IndexFields {
    verse_id: Field,
    surah: Field,
    ayah: Field,
    verse: Field,
    translation_en: Field,
    translation_ps: Field,
    translation_dr: Field,
}

impl IndexFields {
    fn translation(&self, language: Language) -> Field {
        match language {
            Language::En => self.translation_en,
            Language::Ps => self.translation_ps,
            Language::Dr => self.translation_dr,
        }
    }
}

fn text_options(analyzer: &str) -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(analyzer)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    )
}

struct BuiltIndex {
    index: Index,
    reader: IndexReader,
    fields: IndexFields,
    doc_limit: usize,
}

impl BuiltIndex {
    fn build(corpus: &MergedCorpus) -> Result<Self> {
        let start = Instant::now();

        let duplicates = corpus.duplicate_ids();
        if !duplicates.is_empty() {
            return Err(QuranSearchError::Index(format!("Duplicate verse ids: {:?}", duplicates)));
        }

        let mut builder = Schema::builder();
        let fields = IndexFields {
            verse_id: builder.add_u64_field("verse_id", INDEXED | STORED),
            surah: builder.add_u64_field("surah", INDEXED),
            ayah: builder.add_u64_field("ayah", INDEXED),
            verse: builder.add_text_field("verse", text_options(VERSE_TEXT_ANALYZER)),
            translation_en: builder.add_text_field(Language::En.field_name(), text_options(ENGLISH_ANALYZER)),
            translation_ps: builder.add_text_field(Language::Ps.field_name(), text_options(VERSE_TEXT_ANALYZER)),
            translation_dr: builder.add_text_field(Language::Dr.field_name(), text_options(VERSE_TEXT_ANALYZER)),
        };

        let index = Index::create_in_ram(builder.build());
        register_analyzers(index.tokenizers());

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BUDGET)?;
        for record in corpus.records() {
            writer.add_document(doc!(
                fields.verse_id => record.id,
                fields.surah => u64::from(record.surah),
                fields.ayah => u64::from(record.ayah),
                fields.verse => normalize_text(&record.verse),
                fields.translation_en => normalize_text(&record.translation_en),
                fields.translation_ps => normalize_text(&record.translation_ps),
                fields.translation_dr => normalize_text(&record.translation_dr),
            ))?;
        }
        writer.commit()?;

        let reader: IndexReader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;

        info!(docs = corpus.len(), elapsed_ms = start.elapsed().as_millis() as u64, "Built verse search index");

        Ok(Self { index, reader, fields, doc_limit: corpus.len() })
    }

    fn ranked(&self, query: &str, language: Language, filters: &SearchFilters) -> Result<Vec<RankedHit>> {
        if self.doc_limit == 0 {
            return Ok(Vec::new());
        }

        let field = self.fields.translation(language);
        let mut analyzer = self.index.tokenizer_for_field(field)?;
        let terms = analyze(&mut analyzer, query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .iter()
            .map(|term| {
                let term = Term::from_field_text(field, term);
                (Occur::Should, Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)) as Box<dyn Query>)
            })
            .collect();
        let text_query: Box<dyn Query> = Box::new(BooleanQuery::new(clauses));

        let final_query: Box<dyn Query> = match filters.surah {
            Some(surah) => {
                let surah_query = TermQuery::new(Term::from_field_u64(self.fields.surah, u64::from(surah)), IndexRecordOption::Basic);
                Box::new(BooleanQuery::new(vec![(Occur::Must, text_query), (Occur::Must, Box::new(surah_query))]))
            }
            None => text_query,
        };

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&*final_query, &TopDocs::with_limit(self.doc_limit))?;

        top_docs
            .into_iter()
            .map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address)?;
                let id = doc
                    .get_first(self.fields.verse_id)
                    .and_then(|v| v.as_u64())
                    .ok_or_else(|| QuranSearchError::Index(format!("Document {:?} has no verse id", doc_address)))?;
                Ok(RankedHit { id, score })
            })
            .collect()
    }
}

/// Lazily built full-text index over a merged corpus.
///
/// Construction is free; the first query builds the index on a blocking
/// thread. Concurrent first queries wait on the same build, and a build whose
/// caller went away is picked up by the next caller instead of restarted.
pub struct SearchIndex {
    corpus: Arc<MergedCorpus>,
    built: OnceCell<BuiltIndex>,
    pending: Mutex<Option<JoinHandle<Result<BuiltIndex>>>>,
    builds: Arc<AtomicUsize>,
}

impl SearchIndex {
    pub fn new(corpus: Arc<MergedCorpus>) -> Self {
        Self { corpus, built: OnceCell::new(), pending: Mutex::new(None), builds: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn corpus(&self) -> &MergedCorpus {
        &self.corpus
    }

    pub fn is_built(&self) -> bool {
        self.built.initialized()
    }

    /// Number of completed index builds for this instance.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn doc_count(&self) -> Option<u64> {
        self.built.get().map(|built| built.reader.searcher().num_docs())
    }

    async fn built(&self) -> Result<&BuiltIndex> {
        self.built
            .get_or_try_init(|| async {
                // the handle stays parked here if this future is dropped mid-build
                let mut pending = self.pending.lock().await;
                let handle = pending.get_or_insert_with(|| {
                    let corpus = Arc::clone(&self.corpus);
                    let builds = Arc::clone(&self.builds);
                    tokio::task::spawn_blocking(move || {
                        let built = BuiltIndex::build(&corpus)?;
                        builds.fetch_add(1, Ordering::SeqCst);
                        Ok(built)
                    })
                });
                let joined = handle.await;
                *pending = None;
                joined.map_err(|e| QuranSearchError::Index(format!("Index build task failed: {}", e)))?
            })
            .await
    }

    /// Build the index now instead of on the first query.
    pub async fn ensure_built(&self) -> Result<()> {
        self.built().await.map(|_| ())
    }

    /// Ranked ids of the verses whose `language` translation contains any query term.
    pub async fn ranked(&self, query: &str, language: Language, filters: &SearchFilters) -> Result<Vec<RankedHit>> {
        let built = self.built().await?;
        let hits = built.ranked(query, language, filters)?;
        debug!(query, language = language.code(), hits = hits.len(), "Verse search");
        Ok(hits)
    }

    /// Full records matching `query` in the translation selected by `language`, most relevant first.
    ///
    /// An unrecognized language or a query without searchable terms yields no records.
    pub async fn search(&self, query: &str, language: &str) -> Result<Vec<&VerseRecord>> {
        self.ensure_built().await?;
        let Some(language) = Language::parse(language) else {
            debug!(language, "Unknown search language");
            return Ok(Vec::new());
        };

        let ranked = self.ranked(query, language, &SearchFilters::default()).await?;
        Ok(ranked.iter().filter_map(|hit| self.corpus.by_id(hit.id)).collect())
    }

    /// One page of scored results.
    pub async fn search_page(
        &self,
        query: &str,
        language: &str,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> Result<SearchResults<'_>> {
        let started = Instant::now();
        self.ensure_built().await?;
        let ranked = match Language::parse(language) {
            Some(language) => self.ranked(query, language, filters).await?,
            None => Vec::new(),
        };
        Ok(SearchResults::page(&self.corpus, query, language, &ranked, limit, offset, started))
    }
}
