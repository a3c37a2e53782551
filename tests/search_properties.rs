mod common;

use quran_search::{load_corpora, merge_corpora, MergedCorpus, QuranSearchError, SearchIndex};
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_corpus() -> MergedCorpus {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());
    MergedCorpus::load(dir.path()).unwrap()
}

#[test]
fn test_loaded_corpus_is_complete_and_ordered() {
    let corpus = fixture_corpus();
    let ids: Vec<u64> = corpus.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 10]);

    let third = corpus.by_id(3).unwrap();
    assert_eq!(third.translation_en, "The Entirely Merciful, the Especially Merciful.");
    assert_eq!(third.translation_ps, "");
    assert!(corpus.records().iter().all(|r| r.translation_dr.is_empty()));
}

#[test]
fn test_merge_from_disk_is_deterministic() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());
    let (base, translations) = load_corpora(dir.path()).unwrap();
    assert_eq!(merge_corpora(&base, &translations).records(), merge_corpora(&base, &translations).records());
}

#[tokio::test]
async fn test_lazy_build_once() {
    let index = SearchIndex::new(Arc::new(fixture_corpus()));
    assert!(!index.is_built());

    index.search("merciful", "en").await.unwrap();
    index.search("praise", "en").await.unwrap();
    index.search("lord", "dr").await.unwrap();

    assert!(index.is_built());
    assert_eq!(index.build_count(), 1);
    assert_eq!(index.doc_count(), Some(4));
}

#[tokio::test]
async fn test_concurrent_first_queries_share_one_build() {
    let index = Arc::new(SearchIndex::new(Arc::new(fixture_corpus())));
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            tokio::spawn(async move { index.search("merciful", "en").await.map(|hits| hits.len()) })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), 2);
    }
    assert_eq!(index.build_count(), 1);
}

#[tokio::test]
async fn test_results_are_full_records_ranked() {
    let corpus = Arc::new(fixture_corpus());
    let index = SearchIndex::new(Arc::clone(&corpus));

    let hits = index.search("merciful", "en").await.unwrap();
    let ids: Vec<u64> = hits.iter().map(|r| r.id).collect();
    // same term frequency, verse 3 is shorter
    assert_eq!(ids, vec![3, 1]);
    for hit in hits {
        assert!(std::ptr::eq(hit, corpus.by_id(hit.id).unwrap()));
    }
    assert!(std::ptr::eq(index.search("praise", "en").await.unwrap()[0], &corpus.records()[1]));
}

#[tokio::test]
async fn test_field_scoping_and_benign_misses() {
    let index = SearchIndex::new(Arc::new(fixture_corpus()));

    assert!(!index.search("unseen", "en").await.unwrap().is_empty());
    assert!(index.search("unseen", "ps").await.unwrap().is_empty());
    assert!(index.search("unseen", "fr").await.unwrap().is_empty());
    assert!(index.search("", "en").await.unwrap().is_empty());

    let pashto = index.search("الله", "pashto").await.unwrap();
    let mut ids: Vec<u64> = pashto.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_stemmed_english_match() {
    let index = SearchIndex::new(Arc::new(fixture_corpus()));
    let hits = index.search("believing", "en").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 10);
}

#[test]
fn test_missing_base_file_is_corpus_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(MergedCorpus::load(dir.path()), Err(QuranSearchError::Corpus(_))));
}
