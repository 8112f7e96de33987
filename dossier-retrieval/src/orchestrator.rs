//! RetrievalOrchestrator: strict fallback chain, first producing stage wins.
//!
//! vector index → lexical search → merged text → empty. Every backend
//! failure is logged and degrades to the next stage; `retrieve` never
//! fails. The winning stage is reported as a tagged `RetrievalOutcome` so
//! each stage's pre/postconditions stay independently testable.

use std::collections::{HashMap, HashSet};

use dossier_core::config::{IndexConfig, RetrievalConfig};
use dossier_core::constants::{MERGED_ASSET, MERGED_FRAGMENT_ID};
use dossier_core::models::{Candidate, FragmentMeta, RetrievalOutcome, RetrievalStage};
use dossier_core::traits::{IChunkStore, IVectorIndex};
use tracing::{debug, warn};

use crate::text::truncate_chars;

/// Score carried by candidates whose producing stage has no scoring of its
/// own; downstream reranking is the effective arbiter of order.
const NEUTRAL_SCORE: f64 = 0.0;

pub struct RetrievalOrchestrator<'a> {
    index: &'a dyn IVectorIndex,
    store: &'a dyn IChunkStore,
    index_config: &'a IndexConfig,
    config: &'a RetrievalConfig,
}

impl<'a> RetrievalOrchestrator<'a> {
    pub fn new(
        index: &'a dyn IVectorIndex,
        store: &'a dyn IChunkStore,
        index_config: &'a IndexConfig,
        config: &'a RetrievalConfig,
    ) -> Self {
        Self {
            index,
            store,
            index_config,
            config,
        }
    }

    /// Produce a deduplicated, hydrated candidate list. Never fails — on
    /// total backend unavailability the outcome is `Empty` and the caller
    /// applies the terminal no-evidence fallback.
    pub fn retrieve(
        &self,
        case_id: &str,
        question: &str,
        embedding: Option<&[f32]>,
        limit: usize,
    ) -> RetrievalOutcome {
        if let Some(candidates) = self.vector_stage(case_id, embedding, limit) {
            if !candidates.is_empty() {
                return RetrievalOutcome {
                    stage: RetrievalStage::VectorIndex,
                    candidates: dedup_by_fragment_id(candidates),
                };
            }
        }

        if let Some(candidates) = self.lexical_stage(case_id, question) {
            return RetrievalOutcome {
                stage: RetrievalStage::Lexical,
                candidates: dedup_by_fragment_id(candidates),
            };
        }

        if let Some(candidate) = self.merged_stage(case_id) {
            return RetrievalOutcome {
                stage: RetrievalStage::MergedText,
                candidates: vec![candidate],
            };
        }

        debug!(case_id, "no evidence from any retrieval stage");
        RetrievalOutcome::empty()
    }

    /// ANN search + batch hydration. `None` means the stage could not run
    /// (no embedding, no collection, or backend failure); `Some(empty)`
    /// means it ran but every hit was dropped during hydration.
    fn vector_stage(
        &self,
        case_id: &str,
        embedding: Option<&[f32]>,
        limit: usize,
    ) -> Option<Vec<Candidate>> {
        let embedding = embedding?;
        let collection = self.index_config.collection_for(case_id);

        match self.index.has_collection(&collection) {
            Ok(true) => {}
            Ok(false) => {
                debug!(collection, "collection not found, lexical fallback");
                return None;
            }
            Err(e) => {
                warn!(collection, error = %e, "collection probe failed, lexical fallback");
                return None;
            }
        }

        let hits = match self.index.search(&collection, embedding, limit) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(collection, error = %e, "vector search failed, lexical fallback");
                return None;
            }
        };
        if hits.is_empty() {
            return None;
        }

        // Hydrate hit ids in one batch; hits whose id cannot be hydrated
        // are dropped, never kept with empty text.
        let ids: Vec<String> = hits.iter().map(|h| h.fragment_id.clone()).collect();
        let fragments = match self.store.get_by_ids(&ids) {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(error = %e, "hydration failed, lexical fallback");
                return None;
            }
        };
        let by_id: HashMap<&str, _> = fragments.iter().map(|f| (f.id.as_str(), f)).collect();

        let candidates: Vec<Candidate> = hits
            .iter()
            .filter_map(|hit| match by_id.get(hit.fragment_id.as_str()) {
                Some(fragment) if !fragment.text.is_empty() => {
                    Some(Candidate::from_fragment(fragment, hit.score))
                }
                _ => {
                    debug!(fragment_id = %hit.fragment_id, "dropped unhydratable hit");
                    None
                }
            })
            .collect();

        debug!(
            hits = hits.len(),
            hydrated = candidates.len(),
            "vector stage complete"
        );
        Some(candidates)
    }

    /// Case-scoped lexical search. Results carry full text already; the
    /// score stays neutral so reranking decides the final order.
    fn lexical_stage(&self, case_id: &str, question: &str) -> Option<Vec<Candidate>> {
        let fragments = match self
            .store
            .lexical_search(case_id, question, self.config.lexical_cap)
        {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(case_id, error = %e, "lexical search failed, merged-text fallback");
                return None;
            }
        };
        if fragments.is_empty() {
            return None;
        }

        let candidates = fragments
            .iter()
            .filter(|f| !f.text.is_empty())
            .map(|f| Candidate::from_fragment(f, NEUTRAL_SCORE))
            .collect();
        Some(candidates)
    }

    /// Terminal fallback: one synthetic candidate from the case's merged
    /// parsed text, head-truncated, sentinel id, no page metadata.
    fn merged_stage(&self, case_id: &str) -> Option<Candidate> {
        let merged = match self.store.merged_text(case_id) {
            Ok(text) => text?,
            Err(e) => {
                warn!(case_id, error = %e, "merged text lookup failed");
                return None;
            }
        };
        if merged.trim().is_empty() {
            return None;
        }

        Some(Candidate {
            fragment_id: MERGED_FRAGMENT_ID.to_string(),
            text: truncate_chars(&merged, self.config.merged_text_chars),
            meta: FragmentMeta {
                asset: MERGED_ASSET.to_string(),
                page: None,
            },
            score: NEUTRAL_SCORE,
        })
    }
}

/// Collapse duplicate fragment ids to the first occurrence, order preserved.
fn dedup_by_fragment_id(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.fragment_id.clone()))
        .collect()
}
