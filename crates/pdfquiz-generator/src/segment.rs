//! Sentence segmentation and filtering

use crate::config::SegmentStrategy;
use pdfquiz_domain::Sentence;
use regex::Regex;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static PUNCTUATION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary regex"));

/// Split text into trimmed, non-empty sentence units
///
/// Every returned unit is a contiguous substring of `text`.
pub fn split_sentences(text: &str, strategy: SegmentStrategy) -> Vec<String> {
    match strategy {
        SegmentStrategy::Unicode => {
            let sentences = split_unicode(text);
            if sentences.is_empty() && !text.trim().is_empty() {
                split_punctuation(text)
            } else {
                sentences
            }
        }
        SegmentStrategy::Punctuation => split_punctuation(text),
    }
}

/// UAX #29 sentence boundaries.
///
/// UAX #29 also breaks after every line feed, which would cut
/// hard-wrapped PDF lines into fragments, so a unit is only closed when it
/// ends in terminal punctuation or is followed by a blank line. A period
/// after an abbreviation or initial does not close the unit.
fn split_unicode(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut end = 0;

    for (offset, unit) in text.split_sentence_bound_indices() {
        if unit.trim().is_empty() {
            push_trimmed(&mut sentences, &text[start..end]);
            start = offset + unit.len();
            end = start;
            continue;
        }

        end = offset + unit.len();
        if ends_sentence(unit) && !ends_with_abbreviation(unit) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..end]);

    sentences
}

/// Regex fallback: break after `.`, `!` or `?` followed by whitespace
fn split_punctuation(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in PUNCTUATION_BOUNDARY.find_iter(text) {
        // Keep the punctuation mark with its sentence
        push_trimmed(&mut sentences, &text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn ends_sentence(unit: &str) -> bool {
    let closers: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];
    let body = unit.trim_end().trim_end_matches(closers);
    matches!(
        body.chars().last(),
        Some('.' | '!' | '?' | '\u{2026}' | '\u{3002}' | '\u{ff01}' | '\u{ff1f}')
    )
}

/// Abbreviations that are usually followed by more of the same sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "rev", "hon", "gen", "col", "capt",
    "lt", "sgt", "gov", "sen", "rep", "vs", "cf", "approx", "dept", "fig", "figs", "vol", "ch",
    "sec", "eq", "ed", "eds", "al", "inc", "ltd", "corp", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// True when the period ending `unit` belongs to an abbreviation
///
/// Covers known abbreviations (`Dr.`, `Prof.`), single letter initials
/// (`J.`) and dotted initialisms (`U.S.`, `e.g.`).
fn ends_with_abbreviation(unit: &str) -> bool {
    let Some(body) = unit.trim_end().strip_suffix('.') else {
        return false;
    };
    let token = body
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if token.is_empty() {
        return false;
    }

    let is_initialism = token
        .split('.')
        .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic));
    let single_capital = token.chars().count() == 1 && token.chars().all(char::is_uppercase);

    if token.contains('.') {
        return is_initialism;
    }
    single_capital
        || ABBREVIATIONS
            .iter()
            .any(|abbreviation| token.eq_ignore_ascii_case(abbreviation))
}

/// True when a sentence is worth asking a question about
///
/// Rejects sentences of `min_words` words or fewer and purely numeric ones
/// (page numbers, footers).
pub fn is_qualifying(sentence: &Sentence, min_words: usize) -> bool {
    sentence.word_count() > min_words && !sentence.is_numeric()
}

/// Splits text and keeps the qualifying sentences
#[derive(Debug, Clone, Copy)]
pub struct SentenceSegmenter {
    strategy: SegmentStrategy,
    min_words: usize,
}

impl SentenceSegmenter {
    /// Create a new segmenter
    pub fn new(strategy: SegmentStrategy, min_words: usize) -> Self {
        Self {
            strategy,
            min_words,
        }
    }

    /// Ordered qualifying sentences of `text`; may be empty
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        split_sentences(text, self.strategy)
            .into_iter()
            .map(Sentence::new)
            .filter(|s| is_qualifying(s, self.min_words))
            .collect()
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(SegmentStrategy::Unicode, 5)
    }
}
