use regtrack_ai::EmbeddingProvider;
use regtrack_core::{AmendmentAction, Regulation};
use tracing::{debug, info, warn};

use crate::ContractBody;
use crate::placement::{self, PlacementError};

/// Outcome of one [`AmendmentEngine::apply_amendment`] call.
#[derive(Debug)]
pub struct Amendment {
    /// The rewritten paragraphs, or `None` when nothing changed.
    pub paragraphs: Option<Vec<String>>,
    pub actions: Vec<AmendmentAction>,
    /// Regulations whose clause could not be placed.
    pub skipped: Vec<PlacementError>,
}

impl Amendment {
    pub fn is_changed(&self) -> bool {
        self.paragraphs.is_some()
    }
}

/// Rewrites contract paragraphs against a set of regulations.
///
/// The embedding provider is only consulted when a regulation's keywords
/// match no paragraph.
pub struct AmendmentEngine<P> {
    provider: P,
}

impl<P: EmbeddingProvider> AmendmentEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Remove outdated paragraphs, then insert missing clauses.
    ///
    /// Removal runs to completion for every regulation before any insertion,
    /// so an inserted clause is never removed in the same call.
    pub fn apply_amendment(
        &mut self,
        paragraphs: Vec<String>,
        regulations: &[Regulation],
    ) -> Amendment {
        let mut body = ContractBody::new(paragraphs);
        let mut actions = Vec::new();
        let mut skipped = Vec::new();
        let mut changed = false;

        for reg in regulations {
            for kw in &reg.remove_keywords {
                let removed = body.remove_matching(kw);
                if removed > 0 {
                    debug!(regulation = %reg.id, keyword = %kw, removed, "removed paragraphs");
                    actions.push(AmendmentAction::Removed(reg.title.clone()));
                    changed = true;
                }
            }
        }

        for reg in regulations {
            let clause = reg.clause();
            if body.contains(clause) {
                debug!(regulation = %reg.id, "clause already present");
                continue;
            }

            match placement::locate(&body, reg, &mut self.provider) {
                Ok(placement) => {
                    debug!(regulation = %reg.id, ?placement, "placing clause");
                    body.insert_after(Some(placement.index()), clause);
                    actions.push(AmendmentAction::Inserted(reg.title.clone()));
                    changed = true;
                }
                Err(err) => {
                    warn!(regulation = %reg.id, error = %err, "clause not placed");
                    skipped.push(err);
                }
            }
        }

        if changed {
            info!(
                actions = actions.len(),
                paragraphs = body.len(),
                "amendment applied"
            );
        }

        Amendment {
            paragraphs: changed.then(|| body.into_paragraphs()),
            actions,
            skipped,
        }
    }
}
