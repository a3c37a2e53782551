//! Loading of the four verse datasets from a data directory

use crate::corpus::{merge_corpora, BaseCorpus, MergedCorpus, TranslationCorpora, TranslationCorpus};
use crate::error::{QuranSearchError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const BASE_FILE: &str = "ArabicQuran.json";
pub const ENGLISH_FILE: &str = "EnglishQuran.json";
pub const PASHTO_FILE: &str = "PashtoQuran.json";
pub const DARI_FILE: &str = "PersianQuran.json";

#[derive(Deserialize)]
struct BaseCorpusFile {
    #[serde(rename = "quran-uthmani-hafs")]
    verses: BaseCorpus,
}

pub fn load_base_corpus(path: &Path) -> Result<BaseCorpus> {
    let raw = fs::read_to_string(path)
        .map_err(|e| QuranSearchError::Corpus(format!("Failed to read {:?}: {}", path, e)))?;
    let file: BaseCorpusFile = serde_json::from_str(&raw)
        .map_err(|e| QuranSearchError::Corpus(format!("Failed to parse {:?}: {}", path, e)))?;
    Ok(file.verses)
}

/// Reads a translation corpus. A missing file is an empty corpus.
pub fn load_translation_corpus(path: &Path) -> Result<TranslationCorpus> {
    if !path.exists() {
        warn!("Translation file {:?} not found, treating as empty", path);
        return Ok(TranslationCorpus::new());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| QuranSearchError::Corpus(format!("Failed to parse {:?}: {}", path, e)))
}

pub fn load_corpora(data_dir: &Path) -> Result<(BaseCorpus, TranslationCorpora)> {
    let base = load_base_corpus(&data_dir.join(BASE_FILE))?;
    let translations = TranslationCorpora {
        en: load_translation_corpus(&data_dir.join(ENGLISH_FILE))?,
        ps: load_translation_corpus(&data_dir.join(PASHTO_FILE))?,
        dr: load_translation_corpus(&data_dir.join(DARI_FILE))?,
    };
    Ok((base, translations))
}

impl MergedCorpus {
    /// Load all four datasets from `data_dir` and merge them.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let (base, translations) = load_corpora(data_dir)?;
        let merged = merge_corpora(&base, &translations);
        info!(
            verses = merged.len(),
            en = translations.en.len(),
            ps = translations.ps.len(),
            dr = translations.dr.len(),
            "Merged verse corpora from {:?}",
            data_dir
        );
        Ok(merged)
    }
}
