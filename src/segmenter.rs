/*!
 * Sentence segmentation.
 *
 * Splits raw text into an ordered list of trimmed, non-empty sentences. A
 * sentence is a maximal run of non-terminator characters followed by one or
 * more of `.`, `!` or `?`. When the text contains no such run at all, the whole
 * input is treated as a single sentence.
 *
 * Known quirk: a trailing fragment without its own terminator is dropped when
 * at least one terminated sentence precedes it (`"Hi! ok"` yields only `"Hi!"`),
 * but kept when the input has no terminated sentence at all. Callers relying on
 * lossless segmentation should be aware of this.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// Characters that end a sentence
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split `text` into sentences, preserving their original order
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let matches: Vec<&str> = SENTENCE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();

    let pieces = if matches.is_empty() { vec![text] } else { matches };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of whitespace-delimited words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
