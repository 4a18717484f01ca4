//! Embedding — pluggable text → vector mapping used for resume retrieval.
//!
//! Default: `HashingEmbedder`, a lexical bag-of-words projected into 100 buckets
//! through a 32-bit polynomial string hash. It captures word overlap only, not
//! meaning. A model-backed embedder can replace it behind the `Embedder` trait.
//!
//! `AppState` holds an `Arc<dyn Embedder>`.

pub const EMBEDDING_DIMENSIONS: usize = 100;

/// Maps text to a fixed-length numeric vector. Implementations must be
/// deterministic for a given input and always return `dimensions()` values.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn dimensions(&self) -> usize;
}

/// Hash-bucket embedder. Each whitespace token adds `1 / token_count` to the
/// bucket selected by its hash, so a non-empty text sums to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashingEmbedder;

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0_f32; EMBEDDING_DIMENSIONS];

        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        if tokens.is_empty() {
            return embedding;
        }

        let weight = 1.0 / tokens.len() as f32;
        for token in tokens {
            embedding[bucket_for(token)] += weight;
        }

        embedding
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}

/// `hash = hash * 31 + code_unit`, wrapping to i32 at every step.
/// Code units are UTF-16 so non-ASCII tokens land in the same buckets as before.
pub fn token_hash(token: &str) -> i32 {
    token
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

fn bucket_for(token: &str) -> usize {
    // Widen before abs so i32::MIN does not overflow.
    let magnitude = i64::from(token_hash(token)).unsigned_abs();
    (magnitude % EMBEDDING_DIMENSIONS as u64) as usize
}
