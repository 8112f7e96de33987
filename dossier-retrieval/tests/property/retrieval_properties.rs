//! Property tests: rerank permutation/ordering invariants and the context
//! assembler's soft budget bound.

use proptest::prelude::*;

use dossier_core::errors::{DossierResult, RerankError};
use dossier_core::models::{Candidate, Fragment, FragmentMeta};
use dossier_core::traits::{IChunkStore, IRerankClient};
use dossier_retrieval::{context, Reranker};

/// Deterministic pseudo-scores derived from the text itself.
struct HashScores;
impl IRerankClient for HashScores {
    fn score(&self, _query: &str, texts: &[String]) -> DossierResult<Vec<f64>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut h: u64 = 0xcbf29ce484222325;
                for b in t.as_bytes() {
                    h ^= *b as u64;
                    h = h.wrapping_mul(0x100000001b3);
                }
                (h % 1_000) as f64 / 1_000.0
            })
            .collect())
    }
}

struct DownRerank;
impl IRerankClient for DownRerank {
    fn score(&self, _query: &str, _texts: &[String]) -> DossierResult<Vec<f64>> {
        Err(RerankError::Unreachable {
            reason: "prop".to_string(),
        }
        .into())
    }
}

struct EmptyStore;
impl IChunkStore for EmptyStore {
    fn get_by_ids(&self, _ids: &[String]) -> DossierResult<Vec<Fragment>> {
        Ok(Vec::new())
    }
    fn lexical_search(
        &self,
        _case_id: &str,
        _query: &str,
        _limit: usize,
    ) -> DossierResult<Vec<Fragment>> {
        Ok(Vec::new())
    }
    fn merged_text(&self, _case_id: &str) -> DossierResult<Option<String>> {
        Ok(None)
    }
}

fn candidates_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec("[a-z]{1,40}", 1..60).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Candidate {
                fragment_id: format!("f{i}"),
                text,
                meta: FragmentMeta {
                    asset: "a.pdf".to_string(),
                    page: None,
                },
                score: 0.0,
            })
            .collect()
    })
}

fn sorted_ids(candidates: &[Candidate]) -> Vec<String> {
    let mut ids: Vec<String> = candidates.iter().map(|c| c.fragment_id.clone()).collect();
    ids.sort();
    ids
}

proptest! {
    /// Rerank output is a permutation of its (capped) input with
    /// non-increasing scores.
    #[test]
    fn rerank_is_sorted_permutation(candidates in candidates_strategy()) {
        let cap = 50;
        let reranker = Reranker::new(&HashScores, cap);
        let mut expected_input = candidates.clone();
        expected_input.truncate(cap);

        let out = reranker.rerank("query", candidates, &EmptyStore);

        prop_assert_eq!(sorted_ids(&out), sorted_ids(&expected_input));
        prop_assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    /// Client failure preserves the candidate sequence exactly.
    #[test]
    fn rerank_failure_preserves_order(candidates in candidates_strategy()) {
        let reranker = Reranker::new(&DownRerank, 50);
        let mut expected = candidates.clone();
        expected.truncate(50);

        let out = reranker.rerank("query", candidates, &EmptyStore);

        let out_ids: Vec<&str> = out.iter().map(|c| c.fragment_id.as_str()).collect();
        let expected_ids: Vec<&str> = expected.iter().map(|c| c.fragment_id.as_str()).collect();
        prop_assert_eq!(out_ids, expected_ids);
    }

    /// All snippets before the single overflow candidate fit the budget,
    /// and the assembler never reorders or invents entries.
    #[test]
    fn assembler_budget_is_soft_ceiling(
        candidates in candidates_strategy(),
        max_chars in 1usize..200,
    ) {
        let ctx = context::assemble(&candidates, max_chars, 1_000);

        prop_assert!(ctx.len() <= candidates.len());

        if ctx.len() > 1 {
            let before_last: usize = ctx.entries[..ctx.len() - 1]
                .iter()
                .map(|e| e.snippet.chars().count())
                .sum();
            prop_assert!(before_last <= max_chars);
        }

        // Entries mirror the candidate prefix in order.
        for (entry, candidate) in ctx.entries.iter().zip(candidates.iter()) {
            prop_assert_eq!(&entry.fragment_id, &candidate.fragment_id);
        }
    }
}
