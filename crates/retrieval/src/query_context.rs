//! Turns a raw query string into a [`QueryContext`].
//!
//! Two things are extracted:
//! - search terms: `\w+` tokens of the lower-cased query minus stop words
//! - an optional price ceiling ("under 50", "budget 300", "less than 20", ...)

use crate::types::QueryContext;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Words that carry no product intent and never score.
pub const STOP_WORDS: [&str; 15] = [
    "the", "and", "for", "with", "show", "give", "me", "what", "is", "are", "i", "need",
    "looking", "about", "want",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

// No word boundaries: "thunder 5" also yields a ceiling of 5.
// ASCII digits only; a Unicode `\d` would match digits that `f64::from_str` rejects.
static PRICE_CEILING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|less than|below|budget|max|maximum)\s*([0-9]+)")
        .expect("price pattern is valid")
});

/// Build the query context for one request.
pub fn build_query_context(query: &str) -> QueryContext {
    let lowered = query.to_lowercase();

    let terms = tokenize(&lowered);
    let price_ceiling = extract_price_ceiling(&lowered);

    debug!(
        "Parsed query into {} terms (price ceiling: {:?})",
        terms.len(),
        price_ceiling
    );
    QueryContext::new(terms, price_ceiling)
}

/// Split lower-cased text into word tokens, dropping stop words.
fn tokenize(lowered: &str) -> Vec<String> {
    WORD_RE
        .find_iter(lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// First price constraint in the query, if any.
///
/// Only the first match counts; later constraints are ignored.
fn extract_price_ceiling(lowered: &str) -> Option<f64> {
    let captures = PRICE_CEILING_RE.captures(lowered)?;
    captures.get(1)?.as_str().parse().ok()
}
