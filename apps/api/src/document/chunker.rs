//! Sentence-bounded chunking of extracted resume text.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// A sentence is a run of non-terminal characters closed by one or more of `.!?`.
/// The second alternative catches a trailing fragment without terminal punctuation,
/// so every character of the input lands in some sentence.
static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]*[.!?]+|[^.!?]+").expect("sentence pattern is valid"));

/// Splits text into sentence units. Text with no terminal punctuation is one sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Greedily packs sentences into chunks of at most `max_chunk_size` characters.
/// A single sentence longer than the limit becomes its own oversized chunk.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len > max_chunk_size && !current.is_empty() {
            push_trimmed(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    if !current.is_empty() {
        push_trimmed(&mut chunks, &current);
    }

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
