//! Text normalization applied before bag-of-words vectorization.
//!
//! The pipeline matches what the classifier was trained with: lowercase,
//! strip URLs, replace punctuation with spaces, delete digits, drop English
//! stopwords, Porter-stem the remaining tokens.

use std::collections::HashSet;

use regex::Regex;

use crate::stem::stem;
use crate::stopwords::STOPWORDS;

const URL_PATTERN: &str = r"https?://\S+|www\.\S+";

/// Stateless text cleaner with its URL regex and stopword set built once.
///
/// Cheap to share behind an `Arc`; [`normalize`](Normalizer::normalize) is
/// total and never errors.
#[derive(Debug)]
pub struct Normalizer {
    url: Regex,
    stopwords: HashSet<&'static str>,
}

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            url: Regex::new(URL_PATTERN)?,
            stopwords: STOPWORDS.iter().copied().collect(),
        })
    }

    /// Normalize raw text into the space-joined stemmed tokens the
    /// vectorizer expects.
    ///
    /// Empty input, or input that is nothing but URLs, digits, punctuation,
    /// and stopwords, yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_urls = self.url.replace_all(&lowered, " ");

        // Punctuation splits tokens; digits vanish without splitting
        // ("top10" → "top").
        let mut cleaned = String::with_capacity(without_urls.len());
        for ch in without_urls.chars() {
            if ch.is_alphabetic() {
                cleaned.push(ch);
            } else if !ch.is_ascii_digit() {
                cleaned.push(' ');
            }
        }

        cleaned
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(stem)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
