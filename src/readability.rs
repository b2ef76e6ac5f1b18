/*!
 * Readability scoring.
 *
 * Computes word, character, sentence and syllable counts over arbitrary text
 * and derives a Flesch Reading Ease score clamped to 0..=100, together with a
 * qualitative label. Everything here is pure and deterministic.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static SENTENCE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence break pattern is valid"));

static VOWEL_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]+").expect("vowel pattern is valid"));

/// Score used when the formula is undefined (no words or no sentences)
pub const DEGENERATE_SCORE: u8 = 100;

/// Qualitative readability band, ordered from hardest to easiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadabilityLabel {
    #[serde(rename = "Very Hard")]
    VeryHard,
    #[serde(rename = "Hard")]
    Hard,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Very Easy")]
    VeryEasy,
}

impl ReadabilityLabel {
    /// Map a clamped score to its band
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s < 30 => Self::VeryHard,
            s if s < 50 => Self::Hard,
            s if s < 60 => Self::Moderate,
            s if s < 70 => Self::Easy,
            _ => Self::VeryEasy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHard => "Very Hard",
            Self::Hard => "Hard",
            Self::Moderate => "Moderate",
            Self::Easy => "Easy",
            Self::VeryEasy => "Very Easy",
        }
    }
}

impl fmt::Display for ReadabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readability metrics for a snapshot of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityMetrics {
    /// Whitespace-delimited words
    pub words: usize,

    /// Characters excluding whitespace
    pub characters: usize,

    /// Flesch Reading Ease, rounded and clamped to 0..=100
    pub readability: u8,

    /// Band for `readability`
    pub readability_label: ReadabilityLabel,
}

/// Score `text`
pub fn calculate_readability(text: &str) -> ReadabilityMetrics {
    let words = text.split_whitespace().count();
    let characters = text.chars().filter(|c| !c.is_whitespace()).count();
    let sentences = count_sentences(text);
    let syllables = count_syllables(text);

    let readability = flesch_reading_ease(words, sentences, syllables);

    ReadabilityMetrics {
        words,
        characters,
        readability,
        readability_label: ReadabilityLabel::from_score(readability),
    }
}

/// Non-empty segments between runs of `.`, `!` and `?`
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_BREAKS
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Total estimated syllables over every whitespace-delimited token
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace().map(word_syllables).sum()
}

/// Estimated syllables in a single token; 0 for tokens without letters
pub fn word_syllables(token: &str) -> usize {
    let clean: String = token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if clean.is_empty() {
        return 0;
    }

    let mut count = VOWEL_RUNS.find_iter(&clean).count();
    if clean.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> u8 {
    if words == 0 || sentences == 0 {
        return DEGENERATE_SCORE;
    }

    let words = words as f64;
    let score = 206.835
        - 1.015 * (words / sentences as f64)
        - 84.6 * (syllables as f64 / words);

    score.round().clamp(0.0, 100.0) as u8
}
