//! Answer composition: prompt building, the generation call, and the
//! extractive fallback when the backend is unavailable.

use dossier_core::models::{Answer, Candidate, EvidenceContext};
use dossier_core::traits::IGenerationClient;
use tracing::warn;

use crate::text::{collapse_newlines, truncate_chars};

/// Notice prefixed to the extractive fallback answer.
pub const FALLBACK_NOTICE: &str =
    "Generation backend unavailable; returning the retrieved case material instead.";

/// Answer text when no evidence exists for the case at all.
pub const NO_EVIDENCE_NOTICE: &str =
    "No evidence was found in the case material for this question.";

/// Build the single structured generation prompt: the question, the
/// annotated evidence, and the instruction to tag every factual statement
/// with an evidence marker.
pub fn build_prompt(question: &str, context: &EvidenceContext) -> String {
    format!(
        "Answer the question using only the case material excerpts below and \
applicable statutory knowledge. Tag every factual statement with an evidence \
marker of the form [evidence:fragment_id asset p].\n\n\
[Question] {question}\n\n\
[Case material]\n{}\n\n\
Give a clear conclusion followed by a citation list.",
        context.render()
    )
}

/// The answer returned when retrieval produced nothing anywhere.
pub fn no_evidence_answer() -> Answer {
    Answer {
        text: NO_EVIDENCE_NOTICE.to_string(),
        citations: Vec::new(),
    }
}

pub struct AnswerComposer<'a> {
    generation: &'a dyn IGenerationClient,
    max_tokens: u32,
    excerpt_chars: usize,
}

impl<'a> AnswerComposer<'a> {
    pub fn new(generation: &'a dyn IGenerationClient, max_tokens: u32, excerpt_chars: usize) -> Self {
        Self {
            generation,
            max_tokens,
            excerpt_chars,
        }
    }

    /// Invoke generation with the composed prompt; on any failure fall back
    /// to an extractive summary of the top candidates. Always returns
    /// non-empty text when `top` is non-empty.
    pub fn compose(&self, question: &str, context: &EvidenceContext, top: &[Candidate]) -> String {
        let prompt = build_prompt(question, context);
        match self.generation.complete(&prompt, self.max_tokens) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("empty completion, extractive fallback");
                self.fallback_text(question, top)
            }
            Err(e) => {
                warn!(error = %e, "generation failed, extractive fallback");
                self.fallback_text(question, top)
            }
        }
    }

    /// Formatted list of the top candidates' truncated text, prefixed with
    /// the unavailability notice.
    fn fallback_text(&self, question: &str, top: &[Candidate]) -> String {
        let mut lines = vec![
            FALLBACK_NOTICE.to_string(),
            format!("Question: {question}"),
            "Retrieved case material:".to_string(),
        ];
        for candidate in top {
            let page = candidate
                .meta
                .page
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            let excerpt = truncate_chars(
                &collapse_newlines(candidate.text.trim()),
                self.excerpt_chars,
            );
            lines.push(format!(
                "- fragment:{} asset:{} p:{}: {excerpt}",
                candidate.fragment_id, candidate.meta.asset, page
            ));
        }
        lines.join("\n")
    }
}
