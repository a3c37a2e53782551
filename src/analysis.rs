//! Text normalization and tokenizer registration shared by indexing and querying

use tantivy::tokenizer::{
    Language as StemLanguage, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer,
    TokenStream, TokenizerManager,
};

/// Analyzer for Arabic-script fields (verse text, Pashto, Dari).
pub const VERSE_TEXT_ANALYZER: &str = "verse_text";
/// Analyzer for the English translation: stop words removed, stemmed.
pub const ENGLISH_ANALYZER: &str = "translation_en";

const MAX_TOKEN_LEN: usize = 40;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it", "its", "no",
    "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these", "they", "this", "to", "was",
    "were", "will", "with",
];

/// Fold Arabic-script spelling variants and strip marks that do not affect meaning for search.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            // harakat, Quranic annotation marks, tatweel, ZWNJ
            '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}' | '\u{0640}' | '\u{200C}' => None,
            'أ' | 'إ' | 'آ' | 'ٱ' => Some('ا'),
            'ؤ' => Some('و'),
            'ئ' | 'ى' => Some('ي'),
            'ک' | 'گ' | 'ڭ' => Some('ك'),
            'ی' | 'ے' | 'ې' => Some('ي'),
            'ۀ' | 'ە' => Some('ه'),
            'ۃ' => Some('ة'),
            'ٹ' => Some('ت'),
            'پ' => Some('ب'),
            'چ' => Some('ج'),
            'ژ' => Some('ز'),
            'ڤ' => Some('ف'),
            'ڨ' => Some('ق'),
            _ => Some(c),
        })
        .collect()
}

pub fn verse_text_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .build()
}

pub fn english_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(ENGLISH_STOP_WORDS.iter().map(|w| w.to_string())))
        .filter(Stemmer::new(StemLanguage::English))
        .build()
}

pub fn register_analyzers(tokenizers: &TokenizerManager) {
    tokenizers.register(VERSE_TEXT_ANALYZER, verse_text_analyzer());
    tokenizers.register(ENGLISH_ANALYZER, english_analyzer());
}

/// Normalize and tokenize `text`, returning the distinct terms in order of first occurrence.
pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut stream = analyzer.token_stream(&normalized);
    let mut terms: Vec<String> = Vec::new();
    while stream.advance() {
        let term = &stream.token().text;
        if !terms.contains(term) {
            terms.push(term.clone());
        }
    }
    terms
}
