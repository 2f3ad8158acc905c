//! Choosing the paragraph a new clause goes after.

use regtrack_ai::{EmbeddingProvider, best_match};
use regtrack_core::Regulation;
use thiserror::Error;
use tracing::debug;

use crate::ContractBody;

/// Why a regulation's clause could not be placed.
///
/// Scoped to one regulation: the engine logs it and moves on.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("no keyword match and no paragraphs to compare for {regulation:?}")]
    Degenerate { regulation: String },

    #[error("semantic placement failed for {regulation:?}: {source}")]
    Embedding {
        regulation: String,
        #[source]
        source: anyhow::Error,
    },
}

/// The paragraph chosen as anchor, and how it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Keyword { keyword: String, index: usize },
    Semantic { index: usize, similarity: f32 },
}

impl Placement {
    /// Index of the anchor paragraph; the clause goes immediately after it.
    pub fn index(&self) -> usize {
        match self {
            Self::Keyword { index, .. } | Self::Semantic { index, .. } => *index,
        }
    }
}

/// First keyword (in order) that occurs in any paragraph, with the lowest
/// matching paragraph index.
pub fn by_keyword(body: &ContractBody, keywords: &[String]) -> Option<Placement> {
    keywords.iter().find_map(|kw| {
        body.find(kw).map(|index| Placement::Keyword {
            keyword: kw.clone(),
            index,
        })
    })
}

/// Paragraph whose embedding is most similar to the clause's.
pub fn by_similarity<P: EmbeddingProvider + ?Sized>(
    body: &ContractBody,
    clause: &str,
    provider: &mut P,
) -> anyhow::Result<Option<Placement>> {
    if body.is_empty() {
        return Ok(None);
    }
    let texts: Vec<&str> = body.paragraphs().iter().map(String::as_str).collect();
    let paragraph_vecs = provider.embed_batch(&texts)?;
    anyhow::ensure!(
        paragraph_vecs.len() == texts.len(),
        "provider returned {} embeddings for {} paragraphs",
        paragraph_vecs.len(),
        texts.len()
    );
    let clause_vec = provider.embed(clause)?;

    Ok(
        best_match(&paragraph_vecs, &clause_vec).map(|(index, similarity)| Placement::Semantic {
            index,
            similarity,
        }),
    )
}

/// Keyword placement, falling back to semantic placement.
pub fn locate<P: EmbeddingProvider + ?Sized>(
    body: &ContractBody,
    regulation: &Regulation,
    provider: &mut P,
) -> Result<Placement, PlacementError> {
    if let Some(placement) = by_keyword(body, &regulation.keywords) {
        return Ok(placement);
    }
    debug!(regulation = %regulation.id, "no keyword match, trying semantic placement");

    by_similarity(body, regulation.clause(), provider)
        .map_err(|source| PlacementError::Embedding {
            regulation: regulation.title.clone(),
            source,
        })?
        .ok_or_else(|| PlacementError::Degenerate {
            regulation: regulation.title.clone(),
        })
}
