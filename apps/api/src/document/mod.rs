// Document processing: turns uploaded bytes into retrievable resume chunks.
// Extraction, sentence chunking, hashed embeddings and cosine ranking.
// Nothing here touches session state.

pub mod chunker;
pub mod embedding;
pub mod extract;
pub mod similarity;
