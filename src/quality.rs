//! Content quality heuristic for cleaned page text.
//!
//! A rough 0..=1 signal for downstream relevance ranking. It rewards length,
//! sentence structure and informative vocabulary, and is scaled down by the
//! share of repeated lines.

use std::collections::HashSet;

use crate::patterns::INFO_KEYWORDS;

/// Pieces between periods shorter than this (after trimming) are not sentences.
const MIN_SENTENCE_CHARS: usize = 10;

fn length_points(chars: usize) -> f64 {
    match chars {
        n if n > 1000 => 0.4,
        n if n > 500 => 0.3,
        n if n > 100 => 0.2,
        _ => 0.0,
    }
}

fn sentence_points(text: &str) -> f64 {
    let sentences = text
        .split('.')
        .filter(|piece| piece.trim().chars().count() > MIN_SENTENCE_CHARS)
        .count();
    match sentences {
        n if n >= 5 => 0.3,
        n if n >= 2 => 0.2,
        _ => 0.0,
    }
}

fn keyword_points(text: &str) -> f64 {
    let found = INFO_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
    match found {
        n if n >= 3 => 0.2,
        n if n >= 1 => 0.1,
        _ => 0.0,
    }
}

/// Share of distinct lines among all lines.
fn uniqueness(text: &str) -> f64 {
    let lines: Vec<&str> = text.split('\n').collect();
    let unique: HashSet<&str> = lines.iter().copied().collect();
    unique.len() as f64 / lines.len().max(1) as f64
}

/// Quality score of `text` in `0.0..=1.0`. Empty text scores 0.
#[must_use]
pub fn content_quality(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let score = length_points(text.trim().chars().count())
        + sentence_points(text)
        + keyword_points(text);

    (score * uniqueness(text)).min(1.0)
}
