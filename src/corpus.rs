//! Verse corpora and the merged, denormalized record set

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One verse of the base (Arabic) corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseVerse {
    pub id: u64,
    #[serde(default)]
    pub surah: u32,
    #[serde(default)]
    pub ayah: u32,
    #[serde(default)]
    pub verse: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub translation: String,
}

/// Base corpus keyed by verse key, iterated in ascending key order.
pub type BaseCorpus = BTreeMap<u64, BaseVerse>;
/// A `None` entry (JSON `null`) is treated the same as a missing key.
pub type TranslationCorpus = BTreeMap<u64, Option<TranslationEntry>>;

#[derive(Debug, Clone, Default)]
pub struct TranslationCorpora {
    pub en: TranslationCorpus,
    pub ps: TranslationCorpus,
    pub dr: TranslationCorpus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: u64,
    pub surah: u32,
    pub ayah: u32,
    pub verse: String,
    pub translation_en: String,
    pub translation_ps: String,
    pub translation_dr: String,
}

/// Merged record set. Order is fixed at construction and never changes.
#[derive(Debug, Clone, Default)]
pub struct MergedCorpus {
    records: Vec<VerseRecord>,
    positions: HashMap<u64, usize>,
}

fn translation_for(corpus: &TranslationCorpus, key: u64) -> String {
    corpus.get(&key).and_then(Option::as_ref).map(|entry| entry.translation.clone()).unwrap_or_default()
}

/// Join the three translation corpora onto the base corpus by verse key.
///
/// Produces exactly one record per base entry. A key missing from a
/// translation corpus yields an empty translation string.
pub fn merge_corpora(base: &BaseCorpus, translations: &TranslationCorpora) -> MergedCorpus {
    let records = base
        .iter()
        .map(|(&key, verse)| VerseRecord {
            id: verse.id,
            surah: verse.surah,
            ayah: verse.ayah,
            verse: verse.verse.clone(),
            translation_en: translation_for(&translations.en, key),
            translation_ps: translation_for(&translations.ps, key),
            translation_dr: translation_for(&translations.dr, key),
        })
        .collect();

    MergedCorpus::from_records(records)
}

impl MergedCorpus {
    pub fn from_records(records: Vec<VerseRecord>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            positions.entry(record.id).or_insert(pos);
        }
        Self { records, positions }
    }

    pub fn records(&self) -> &[VerseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&VerseRecord> {
        self.records.get(position)
    }

    /// Position of the first record carrying `id`.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn by_id(&self, id: u64) -> Option<&VerseRecord> {
        self.position_of(id).and_then(|pos| self.records.get(pos))
    }

    /// All records of a surah, ordered by ayah.
    pub fn surah(&self, surah: u32) -> Vec<&VerseRecord> {
        let mut verses: Vec<&VerseRecord> = self.records.iter().filter(|r| r.surah == surah).collect();
        verses.sort_by_key(|r| r.ayah);
        verses
    }

    /// Logical ids that occur on more than one record.
    pub fn duplicate_ids(&self) -> Vec<u64> {
        let mut dupes: Vec<u64> = self
            .records
            .iter()
            .enumerate()
            .filter(|(pos, r)| self.positions.get(&r.id) != Some(pos))
            .map(|(_, r)| r.id)
            .collect();
        dupes.sort_unstable();
        dupes.dedup();
        dupes
    }
}
