//! Embedding layer: a provider capability for semantic placement, plus the
//! implementations the CLI can inject.

mod lexical;
mod provider;

pub use lexical::LexicalEmbedder;
pub use provider::{EmbeddingProvider, LazyProvider, best_match, cosine_similarity};

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
pub use embedder::{Embedder, Pooling};
