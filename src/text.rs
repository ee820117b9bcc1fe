// src/text.rs
//! Text normalizer and keyword matcher.
//!
//! Event title + description are lower-cased and concatenated once per event. Keywords
//! are then tested for containment. Two modes:
//! - `Substring` (default): unqualified substring containment, so "war" hits "warehouse".
//! - `WordBoundary` (opt-in): the keyword's words must appear as whole, adjacent tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Event;

// \w covers [A-Za-z0-9_]; (?u) enables Unicode
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("word regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Substring,
    WordBoundary,
}

/// Basic, Unicode-friendly tokenizer (lower-cased words, punctuation dropped).
pub fn tokenize(input: &str) -> Vec<String> {
    WORD_RE
        .find_iter(input)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Space-delimited token stream with sentinels at both ends, so `" trade war "`
/// can only match whole words.
fn token_line(input: &str) -> String {
    let toks = tokenize(input);
    let mut out = String::with_capacity(input.len() + 2);
    out.push(' ');
    for t in toks {
        out.push_str(&t);
        out.push(' ');
    }
    out
}

/// Normalized event text, prepared once per scored event.
#[derive(Debug, Clone)]
pub struct EventText {
    /// Lower-cased `title + " " + description`.
    pub raw: String,
    tokens: String,
}

impl EventText {
    pub fn new(event: &Event) -> Self {
        let raw = format!("{} {}", event.title, event.description).to_lowercase();
        let tokens = token_line(&raw);
        Self { raw, tokens }
    }
}

/// Keyword containment according to the configured `MatchMode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher {
    mode: MatchMode,
}

impl KeywordMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// `keyword` is expected lower-case (intelligence tables are lower-cased at load).
    pub fn contains(&self, text: &EventText, keyword: &str) -> bool {
        if keyword.trim().is_empty() {
            return false;
        }
        match self.mode {
            MatchMode::Substring => text.raw.contains(keyword),
            MatchMode::WordBoundary => {
                let needle = token_line(keyword);
                !needle.trim().is_empty() && text.tokens.contains(needle.as_str())
            }
        }
    }

    /// Number of `keywords` found in `text`.
    pub fn count_matches(&self, text: &EventText, keywords: &[String]) -> usize {
        keywords.iter().filter(|k| self.contains(text, k)).count()
    }
}

/// Case-insensitive, either-direction containment used for tag-to-tag comparisons
/// (business unit vs category, region vs region). Empty strings never match.
pub fn tags_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}
