//! AskEngine: sequences the full pipeline for one request.
//!
//! embed (best-effort) → retrieve → rerank → take top-k → assemble →
//! generate (or extractive fallback) → log. Each stage fails forward into
//! its defined fallback exactly once; no stage is retried. The only error
//! surfaced to the caller is malformed input.

use std::collections::HashSet;

use dossier_core::config::DossierConfig;
use dossier_core::errors::{DossierResult, PipelineError};
use dossier_core::models::{Answer, Citation, QueryLogEntry};
use dossier_core::traits::{
    IChunkStore, IEmbeddingProvider, IGenerationClient, IQueryLog, IRerankClient, IVectorIndex,
};
use tracing::{debug, info, info_span, warn};

use crate::compose::{self, AnswerComposer};
use crate::context;
use crate::orchestrator::RetrievalOrchestrator;
use crate::reranker::Reranker;

/// The externally visible pipeline root. Backends are constructed once at
/// startup and passed in by reference; each `ask` call is an independent,
/// stateless request.
pub struct AskEngine<'a> {
    store: &'a dyn IChunkStore,
    index: &'a dyn IVectorIndex,
    rerank_client: &'a dyn IRerankClient,
    generation: &'a dyn IGenerationClient,
    embedder: Option<&'a dyn IEmbeddingProvider>,
    query_log: Option<&'a dyn IQueryLog>,
    config: DossierConfig,
}

impl<'a> AskEngine<'a> {
    pub fn new(
        store: &'a dyn IChunkStore,
        index: &'a dyn IVectorIndex,
        rerank_client: &'a dyn IRerankClient,
        generation: &'a dyn IGenerationClient,
        config: DossierConfig,
    ) -> Self {
        Self {
            store,
            index,
            rerank_client,
            generation,
            embedder: None,
            query_log: None,
            config,
        }
    }

    /// Attach a question embedder. Without one the vector stage never runs
    /// and retrieval starts at lexical search.
    pub fn with_embedder(mut self, embedder: &'a dyn IEmbeddingProvider) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Attach the append-only query log sink.
    pub fn with_query_log(mut self, query_log: &'a dyn IQueryLog) -> Self {
        self.query_log = Some(query_log);
        self
    }

    /// Answer a question against one case's documents.
    ///
    /// Returns a non-empty answer whenever any parsed text exists for the
    /// case; citations are empty only when no evidence was found at all.
    pub fn ask(
        &self,
        case_id: &str,
        question: &str,
        top_k: Option<usize>,
    ) -> DossierResult<Answer> {
        if case_id.trim().is_empty() {
            return Err(PipelineError::InvalidRequest {
                reason: "case_id must not be empty".to_string(),
            }
            .into());
        }
        if question.trim().is_empty() {
            return Err(PipelineError::InvalidRequest {
                reason: "question must not be empty".to_string(),
            }
            .into());
        }
        let top_k = match top_k {
            Some(0) => {
                return Err(PipelineError::InvalidRequest {
                    reason: "top_k must be positive".to_string(),
                }
                .into())
            }
            Some(k) => k,
            None => self.config.retrieval.top_k,
        };

        let request_id = uuid::Uuid::new_v4();
        let span = info_span!("ask", case_id, %request_id);
        let _enter = span.enter();

        // Step 1: Embed the question. Best-effort — failure means the
        // vector stage is skipped, not that the request fails.
        let embedding = self.embedder.and_then(|e| match e.embed(question) {
            Ok(vec) => Some(vec),
            Err(err) => {
                warn!(error = %err, "question embedding failed, skipping vector stage");
                None
            }
        });

        // Step 2: Retrieve through the fallback chain, capped at the
        // rerank batch size so reranking sees a full slate.
        let orchestrator = RetrievalOrchestrator::new(
            self.index,
            self.store,
            &self.config.index,
            &self.config.retrieval,
        );
        let outcome = orchestrator.retrieve(
            case_id,
            question,
            embedding.as_deref(),
            self.config.rerank.rerank_cap,
        );
        info!(
            stage = ?outcome.stage,
            candidates = outcome.candidates.len(),
            "retrieval complete"
        );

        // Step 3: Cross-encoder rerank (pass-through on failure).
        let reranker = Reranker::new(self.rerank_client, self.config.rerank.rerank_cap);
        let mut top = reranker.rerank(question, outcome.candidates, self.store);

        // Step 4: Keep the top-k evidence set.
        top.truncate(top_k);

        if top.is_empty() {
            debug!("no candidates survived retrieval");
            let answer = compose::no_evidence_answer();
            self.log_answer(case_id, question, &answer);
            return Ok(answer);
        }

        // Step 5: Assemble the budgeted context.
        let evidence = context::assemble(
            &top,
            self.config.retrieval.max_context_chars,
            self.config.retrieval.snippet_chars,
        );
        debug!(entries = evidence.len(), "context assembled");

        // Step 6: Generate, or fall back to the extractive summary.
        let composer = AnswerComposer::new(
            self.generation,
            self.config.generation.max_tokens,
            self.config.retrieval.fallback_excerpt_chars,
        );
        let text = composer.compose(question, &evidence, &top);

        // Citations come from the final candidate list, never from the
        // generator's output, restricted to fragments actually present in
        // the context handed to generation.
        let context_ids: HashSet<&str> = evidence.fragment_ids().into_iter().collect();
        let citations: Vec<Citation> = top
            .iter()
            .filter(|c| context_ids.contains(c.fragment_id.as_str()))
            .map(Citation::from_candidate)
            .collect();

        let answer = Answer { text, citations };
        self.log_answer(case_id, question, &answer);
        info!(citations = answer.citations.len(), "ask complete");
        Ok(answer)
    }

    /// Append to the query log. Best-effort: the log is not core to
    /// correctness and a failed append never fails the request.
    fn log_answer(&self, case_id: &str, question: &str, answer: &Answer) {
        if let Some(log) = self.query_log {
            let entry =
                QueryLogEntry::new(case_id, question, &answer.text, answer.citations.clone());
            if let Err(e) = log.append(&entry) {
                warn!(error = %e, "query log append failed");
            }
        }
    }
}
