//! Cross-encoder reranking with pass-through degradation.
//!
//! One batched client call re-scores the candidates; on any client failure
//! the input order is returned unchanged — callers must not assume
//! post-rerank ordering reflects relevance in that case, only that the
//! candidate set is preserved.

use std::collections::HashMap;

use dossier_core::models::Candidate;
use dossier_core::traits::{IChunkStore, IRerankClient};
use tracing::{debug, warn};

pub struct Reranker<'a> {
    client: &'a dyn IRerankClient,
    /// Input truncation bound, applied before scoring to bound request size.
    cap: usize,
}

impl<'a> Reranker<'a> {
    pub fn new(client: &'a dyn IRerankClient, cap: usize) -> Self {
        Self { client, cap }
    }

    /// Deterministic for fixed inputs: score-descending, stable tie-break
    /// by original input order (first-seen wins ties).
    pub fn rerank(
        &self,
        question: &str,
        mut candidates: Vec<Candidate>,
        store: &dyn IChunkStore,
    ) -> Vec<Candidate> {
        candidates.truncate(self.cap);
        let batch = hydrate_missing(candidates, store);
        if batch.is_empty() {
            return batch;
        }

        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        match self.client.score(question, &texts) {
            Ok(scores) => {
                let mut scored: Vec<Candidate> = batch
                    .into_iter()
                    .zip(scores)
                    .map(|(mut candidate, score)| {
                        candidate.score = score;
                        candidate
                    })
                    .collect();
                // Vec::sort_by is stable: equal scores keep input order.
                scored.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                debug!(candidates = scored.len(), "rerank complete");
                scored
            }
            Err(e) => {
                warn!(error = %e, "rerank failed, pass-through ordering");
                batch
            }
        }
    }
}

/// Re-hydrate candidates that arrived without text (id + score only).
/// A candidate that still has no text after the batch fetch is dropped
/// rather than scored with empty text.
fn hydrate_missing(candidates: Vec<Candidate>, store: &dyn IChunkStore) -> Vec<Candidate> {
    let missing: Vec<String> = candidates
        .iter()
        .filter(|c| !c.has_text())
        .map(|c| c.fragment_id.clone())
        .collect();
    if missing.is_empty() {
        return candidates;
    }

    let fetched = match store.get_by_ids(&missing) {
        Ok(fragments) => fragments,
        Err(e) => {
            warn!(error = %e, "pre-rerank hydration failed, dropping text-less candidates");
            Vec::new()
        }
    };
    let by_id: HashMap<&str, _> = fetched.iter().map(|f| (f.id.as_str(), f)).collect();

    candidates
        .into_iter()
        .filter_map(|mut candidate| {
            if candidate.has_text() {
                return Some(candidate);
            }
            match by_id.get(candidate.fragment_id.as_str()) {
                Some(fragment) if !fragment.text.is_empty() => {
                    candidate.text = fragment.text.clone();
                    candidate.meta = fragment.meta.clone();
                    Some(candidate)
                }
                _ => {
                    debug!(fragment_id = %candidate.fragment_id, "dropped text-less candidate");
                    None
                }
            }
        })
        .collect()
}
