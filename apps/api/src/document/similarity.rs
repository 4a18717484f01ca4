use std::cmp::Ordering;

use crate::models::analysis::DocumentChunk;

pub const DEFAULT_TOP_K: usize = 3;

/// Cosine similarity over the overlapping prefix of both vectors.
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Returns the text of the `k` chunks most similar to `query`, best first.
/// `sort_by` is stable, so equal scores keep their original chunk order.
pub fn rank_chunks(query: &[f32], chunks: &[DocumentChunk], k: usize) -> Vec<String> {
    let mut scored: Vec<(f32, &DocumentChunk)> = chunks
        .iter()
        .map(|chunk| (cosine_similarity(query, &chunk.embedding), chunk))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(k)
        .map(|(_, chunk)| chunk.text.clone())
        .collect()
}
