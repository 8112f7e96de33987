//! End-to-end pipeline tests over mock collaborators, plus one full-stack
//! run against the real SQLite fragment store.

use std::collections::HashMap;
use std::sync::Mutex;

use pretty_assertions::assert_eq;

use dossier_core::config::DossierConfig;
use dossier_core::errors::{
    DossierResult, GenerationError, IndexError, RerankError,
};
use dossier_core::models::{Citation, Fragment, QueryLogEntry};
use dossier_core::traits::{
    IChunkStore, IEmbeddingProvider, IGenerationClient, IQueryLog, IRerankClient, IVectorIndex,
    VectorHit,
};
use dossier_retrieval::compose::{FALLBACK_NOTICE, NO_EVIDENCE_NOTICE};
use dossier_retrieval::AskEngine;

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

/// In-memory store. Lexical search returns the case's fragments in
/// insertion order (duplicated entries allowed, for dedup tests).
struct MockStore {
    fragments: Vec<Fragment>,
    merged: HashMap<String, String>,
}

impl MockStore {
    fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            merged: HashMap::new(),
        }
    }

    fn with_merged(mut self, case_id: &str, text: &str) -> Self {
        self.merged.insert(case_id.to_string(), text.to_string());
        self
    }
}

impl IChunkStore for MockStore {
    fn get_by_ids(&self, ids: &[String]) -> DossierResult<Vec<Fragment>> {
        Ok(self
            .fragments
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    fn lexical_search(
        &self,
        case_id: &str,
        _query: &str,
        limit: usize,
    ) -> DossierResult<Vec<Fragment>> {
        Ok(self
            .fragments
            .iter()
            .filter(|f| f.case_id == case_id)
            .take(limit)
            .cloned()
            .collect())
    }

    fn merged_text(&self, case_id: &str) -> DossierResult<Option<String>> {
        Ok(self.merged.get(case_id).cloned())
    }
}

/// Index with no collections at all.
struct NoCollectionIndex;
impl IVectorIndex for NoCollectionIndex {
    fn has_collection(&self, _name: &str) -> DossierResult<bool> {
        Ok(false)
    }
    fn search(&self, _c: &str, _v: &[f32], _l: usize) -> DossierResult<Vec<VectorHit>> {
        Ok(Vec::new())
    }
}

/// Index returning a fixed hit list.
struct HitsIndex(Vec<VectorHit>);
impl IVectorIndex for HitsIndex {
    fn has_collection(&self, _name: &str) -> DossierResult<bool> {
        Ok(true)
    }
    fn search(&self, _c: &str, _v: &[f32], limit: usize) -> DossierResult<Vec<VectorHit>> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

/// Index whose search always fails.
struct DownIndex;
impl IVectorIndex for DownIndex {
    fn has_collection(&self, _name: &str) -> DossierResult<bool> {
        Ok(true)
    }
    fn search(&self, _c: &str, _v: &[f32], _l: usize) -> DossierResult<Vec<VectorHit>> {
        Err(IndexError::Unreachable {
            reason: "mock".to_string(),
        }
        .into())
    }
}

/// Scores each text by length (longer = more relevant) — deterministic
/// and easy to reason about in assertions.
struct LengthRerank;
impl IRerankClient for LengthRerank {
    fn score(&self, _query: &str, texts: &[String]) -> DossierResult<Vec<f64>> {
        Ok(texts.iter().map(|t| t.chars().count() as f64).collect())
    }
}

struct DownRerank;
impl IRerankClient for DownRerank {
    fn score(&self, _query: &str, _texts: &[String]) -> DossierResult<Vec<f64>> {
        Err(RerankError::Unreachable {
            reason: "mock".to_string(),
        }
        .into())
    }
}

/// Records the prompt it was given and returns a fixed completion.
struct RecordingGen {
    prompts: Mutex<Vec<String>>,
}
impl RecordingGen {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }
    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}
impl IGenerationClient for RecordingGen {
    fn complete(&self, prompt: &str, _max_tokens: u32) -> DossierResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("当事人是张某。[evidence:f1 a.pdf 2]".to_string())
    }
}

struct DownGen;
impl IGenerationClient for DownGen {
    fn complete(&self, _prompt: &str, _max_tokens: u32) -> DossierResult<String> {
        Err(GenerationError::Unreachable {
            reason: "mock timeout".to_string(),
        }
        .into())
    }
}

struct FixedEmbedder;
impl IEmbeddingProvider for FixedEmbedder {
    fn embed(&self, _text: &str) -> DossierResult<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0])
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "fixed-mock"
    }
    fn is_available(&self) -> bool {
        true
    }
}

struct FailingEmbedder;
impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> DossierResult<Vec<f32>> {
        Err(dossier_core::errors::EmbeddingError::InferenceFailed {
            reason: "mock".to_string(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "failing-mock"
    }
    fn is_available(&self) -> bool {
        false
    }
}

/// Captures appended query-log entries.
struct CapturingLog {
    entries: Mutex<Vec<QueryLogEntry>>,
}
impl CapturingLog {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}
impl IQueryLog for CapturingLog {
    fn append(&self, entry: &QueryLogEntry) -> DossierResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn chinese_case() -> MockStore {
    MockStore::new(vec![Fragment::new(
        "f1",
        "c1",
        "当事人张某于2020年1月1日签订了房屋租赁合同",
        "a.pdf",
        Some(2),
    )])
}

fn cite(id: &str, asset: &str, page: Option<u32>) -> Citation {
    Citation {
        fragment_id: id.to_string(),
        asset: asset.to_string(),
        page,
    }
}

// ---------------------------------------------------------------------------
// Degradation scenarios
// ---------------------------------------------------------------------------

#[test]
fn lexical_fallback_answers_with_single_fragment_citation() {
    // No vector collection exists: retrieval falls back to lexical search,
    // rerank runs on the single candidate, context carries f1.
    let store = chinese_case();
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );

    let answer = engine.ask("c1", "谁是当事人？", Some(3)).unwrap();

    assert_eq!(answer.citations, vec![cite("f1", "a.pdf", Some(2))]);
    assert!(!answer.text.is_empty());
    // The prompt handed to generation carries f1's header and text.
    let prompt = generation.last_prompt();
    assert!(prompt.contains("[evidence:f1 asset:a.pdf p:2]"));
    assert!(prompt.contains("当事人张某"));
    assert!(prompt.contains("谁是当事人？"));
}

#[test]
fn generation_timeout_keeps_citations_and_adds_notice() {
    let store = chinese_case();

    // Run once with a working generator to capture the expected citations.
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );
    let healthy = engine.ask("c1", "谁是当事人？", Some(3)).unwrap();

    // Same request with the generation backend down.
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &DownGen,
        DossierConfig::default(),
    );
    let degraded = engine.ask("c1", "谁是当事人？", Some(3)).unwrap();

    assert!(degraded.text.contains(FALLBACK_NOTICE));
    assert!(!degraded.text.is_empty());
    assert_eq!(degraded.citations, healthy.citations);
}

#[test]
fn no_evidence_yields_empty_citations_and_notice() {
    let store = MockStore::new(Vec::new());
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &DownGen,
        DossierConfig::default(),
    );

    let answer = engine.ask("c-empty", "anything?", None).unwrap();
    assert_eq!(answer.text, NO_EVIDENCE_NOTICE);
    assert!(answer.citations.is_empty());
}

#[test]
fn zero_vector_hits_fall_back_to_exactly_lexical_results() {
    let store = MockStore::new(vec![
        Fragment::new("l1", "c1", "first lexical result", "x.pdf", Some(1)),
        Fragment::new("l2", "c1", "second lexical result", "x.pdf", Some(2)),
    ]);
    let index = HitsIndex(Vec::new()); // collection exists, zero hits
    let embedder = FixedEmbedder;
    let generation = RecordingGen::new();
    // Rerank down: ordering stays exactly the lexical result order.
    let engine = AskEngine::new(
        &store,
        &index,
        &DownRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_embedder(&embedder);

    let answer = engine.ask("c1", "lexical", None).unwrap();
    assert_eq!(
        answer.citations,
        vec![cite("l1", "x.pdf", Some(1)), cite("l2", "x.pdf", Some(2))]
    );
}

// ---------------------------------------------------------------------------
// Stage behavior
// ---------------------------------------------------------------------------

#[test]
fn vector_stage_wins_when_hits_hydrate() {
    let store = MockStore::new(vec![
        Fragment::new("f1", "c1", "short", "a.pdf", Some(1)),
        Fragment::new("f2", "c1", "a much longer fragment text", "a.pdf", Some(2)),
    ]);
    let index = HitsIndex(vec![
        VectorHit {
            fragment_id: "f1".to_string(),
            score: 0.99,
        },
        VectorHit {
            fragment_id: "f2".to_string(),
            score: 0.42,
        },
    ]);
    let embedder = FixedEmbedder;
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &index,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_embedder(&embedder);

    let answer = engine.ask("c1", "question", None).unwrap();
    // LengthRerank promotes the longer f2 over f1 regardless of ANN order.
    assert_eq!(answer.citations[0].fragment_id, "f2");
    assert_eq!(answer.citations[1].fragment_id, "f1");
}

#[test]
fn unhydratable_hits_are_dropped() {
    let store = MockStore::new(vec![Fragment::new("f1", "c1", "present", "a.pdf", None)]);
    let index = HitsIndex(vec![
        VectorHit {
            fragment_id: "ghost".to_string(),
            score: 0.9,
        },
        VectorHit {
            fragment_id: "f1".to_string(),
            score: 0.8,
        },
    ]);
    let embedder = FixedEmbedder;
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &index,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_embedder(&embedder);

    let answer = engine.ask("c1", "question", None).unwrap();
    assert_eq!(answer.citations, vec![cite("f1", "a.pdf", None)]);
}

#[test]
fn ann_failure_degrades_to_lexical() {
    let store = MockStore::new(vec![Fragment::new("l1", "c1", "lexical text", "x.pdf", None)]);
    let embedder = FixedEmbedder;
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &DownIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_embedder(&embedder);

    let answer = engine.ask("c1", "question", None).unwrap();
    assert_eq!(answer.citations[0].fragment_id, "l1");
}

#[test]
fn embedding_failure_skips_vector_stage() {
    let store = MockStore::new(vec![Fragment::new("l1", "c1", "lexical text", "x.pdf", None)]);
    // The index would return hits, but without an embedding it is never asked.
    let index = HitsIndex(vec![VectorHit {
        fragment_id: "ghost".to_string(),
        score: 0.9,
    }]);
    let embedder = FailingEmbedder;
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &index,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_embedder(&embedder);

    let answer = engine.ask("c1", "question", None).unwrap();
    assert_eq!(answer.citations[0].fragment_id, "l1");
}

#[test]
fn merged_text_is_terminal_evidence_fallback() {
    let store = MockStore::new(Vec::new()).with_merged("c1", "the whole merged case body");
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );

    let answer = engine.ask("c1", "question", None).unwrap();
    assert_eq!(answer.citations, vec![cite("merged", "merged", None)]);
    assert!(generation.last_prompt().contains("the whole merged case body"));
}

#[test]
fn duplicate_lexical_results_collapse_to_first() {
    let fragment = Fragment::new("f1", "c1", "duplicated row", "a.pdf", Some(1));
    let store = MockStore::new(vec![fragment.clone(), fragment]);
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );

    let answer = engine.ask("c1", "question", None).unwrap();
    assert_eq!(answer.citations.len(), 1);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn citations_are_subset_of_context_even_under_budget_overflow() {
    // Six 1000-char fragments against the default 3000-char context budget:
    // only the first four enter the context, and citations must not name
    // the excluded ones.
    let fragments: Vec<Fragment> = (0..6)
        .map(|i| {
            Fragment::new(
                &format!("f{i}"),
                "c1",
                &"x".repeat(1_000),
                "a.pdf",
                Some(i as u32),
            )
        })
        .collect();
    let store = MockStore::new(fragments);
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &DownRerank,
        &generation,
        DossierConfig::default(),
    );

    let answer = engine.ask("c1", "question", Some(6)).unwrap();
    assert_eq!(answer.citations.len(), 4);
    let prompt = generation.last_prompt();
    for citation in &answer.citations {
        assert!(prompt.contains(&format!("[evidence:{}", citation.fragment_id)));
    }
    assert!(!prompt.contains("[evidence:f4"));
    assert!(!prompt.contains("[evidence:f5"));
}

#[test]
fn identical_requests_yield_identical_citations() {
    let store = MockStore::new(vec![
        Fragment::new("f1", "c1", "alpha fragment", "a.pdf", Some(1)),
        Fragment::new("f2", "c1", "beta fragment body", "a.pdf", Some(2)),
    ]);
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );

    let first = engine.ask("c1", "question", None).unwrap();
    let second = engine.ask("c1", "question", None).unwrap();
    assert_eq!(first.citations, second.citations);
}

#[test]
fn top_k_bounds_the_evidence_set() {
    let fragments: Vec<Fragment> = (0..10)
        .map(|i| Fragment::new(&format!("f{i}"), "c1", &format!("body {i}"), "a.pdf", None))
        .collect();
    let store = MockStore::new(fragments);
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &DownRerank,
        &generation,
        DossierConfig::default(),
    );

    let answer = engine.ask("c1", "question", Some(2)).unwrap();
    assert_eq!(answer.citations.len(), 2);
}

#[test]
fn malformed_input_is_rejected_before_the_pipeline() {
    let store = MockStore::new(Vec::new());
    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    );

    assert!(engine.ask("", "question", None).is_err());
    assert!(engine.ask("c1", "   ", None).is_err());
    assert!(engine.ask("c1", "question", Some(0)).is_err());
}

#[test]
fn every_ask_appends_one_query_log_entry() {
    let store = chinese_case();
    let generation = RecordingGen::new();
    let log = CapturingLog::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &LengthRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_query_log(&log);

    engine.ask("c1", "谁是当事人？", None).unwrap();
    engine.ask("c-empty", "nothing here?", None).unwrap();

    let entries = log.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].citations.len(), 1);
    // The no-evidence answer is logged too, with empty citations.
    assert!(entries[1].citations.is_empty());
}

// ---------------------------------------------------------------------------
// Full stack over the real store
// ---------------------------------------------------------------------------

#[test]
fn full_stack_lexical_retrieval_over_sqlite() {
    let store = dossier_store::FragmentStore::open_in_memory().unwrap();
    store
        .insert_fragments(&[
            Fragment::new(
                "s1",
                "c9",
                "The tenant defaulted on rent in June",
                "lease.pdf",
                Some(4),
            ),
            Fragment::new(
                "s2",
                "c9",
                "An unrelated inventory appendix",
                "appendix.pdf",
                Some(1),
            ),
        ])
        .unwrap();

    let generation = RecordingGen::new();
    let engine = AskEngine::new(
        &store,
        &NoCollectionIndex,
        &DownRerank,
        &generation,
        DossierConfig::default(),
    )
    .with_query_log(&store);

    let answer = engine
        .ask("c9", "when did the tenant default on rent?", None)
        .unwrap();

    assert_eq!(answer.citations[0].fragment_id, "s1");
    assert!(generation.last_prompt().contains("defaulted on rent"));

    let logged = store.recent_queries("c9", 10).unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].citations, answer.citations);
}
