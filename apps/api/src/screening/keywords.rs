//! Keyword extraction from a job description by frequency filtering.
//!
//! Not linguistic: long stop-words ("should", "within") can survive.

use std::collections::HashMap;

pub const MAX_KEYWORDS: usize = 15;
const MIN_KEYWORD_LEN: usize = 6;
const MIN_FREQUENCY: u32 = 2;

/// Returns up to 15 keywords: lowercase tokens longer than five characters that
/// appear at least twice, stripped to `[a-z0-9+]`, in order of first appearance.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut order: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in lowered
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
    {
        match index.get(word) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(word, order.len());
                order.push((word, 1));
            }
        }
    }

    order
        .into_iter()
        .filter(|(_, count)| *count >= MIN_FREQUENCY)
        .map(|(word, _)| strip_to_keyword_chars(word))
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .take(MAX_KEYWORDS)
        .collect()
}

fn strip_to_keyword_chars(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '+')
        .collect()
}
