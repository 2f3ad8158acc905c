//! Hashed term-frequency embeddings.
//!
//! A dependency-free stand-in for a neural model: each lower-cased word is
//! hashed into one of `dim` buckets and the counts are L2-normalised. Texts
//! sharing vocabulary score high under cosine similarity; texts with no words
//! in common score 0 (barring hash collisions).

use crate::provider::{EmbeddingProvider, normalize};

const DEFAULT_DIM: usize = 512;
const MIN_WORD_LEN: usize = 3;

/// Bag-of-words embedder with feature hashing.
pub struct LexicalEmbedder {
    dim: usize,
}

impl Default for LexicalEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl LexicalEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        let lower = text.to_lowercase();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        {
            v[(fnv1a(word.as_bytes()) % self.dim as u64) as usize] += 1.0;
        }
        normalize(&mut v);
        v
    }
}

impl EmbeddingProvider for LexicalEmbedder {
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// 64-bit FNV-1a, stable across platforms and releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}
