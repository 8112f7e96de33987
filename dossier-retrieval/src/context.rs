//! Context assembly: pack top candidates into a size-bounded annotated
//! context. Pure and deterministic.

use dossier_core::models::{Candidate, ContextEntry, EvidenceContext};

use crate::text::{collapse_newlines, truncate_chars};

/// Iterate candidates in order, emitting a provenance header and a
/// newline-collapsed snippet per candidate. The running character count
/// covers snippets only (not headers); the candidate that pushes past
/// `max_chars` is still included in full — the budget is a soft ceiling
/// checked after inclusion, not a hard mid-candidate truncation.
pub fn assemble(
    candidates: &[Candidate],
    max_chars: usize,
    snippet_chars: usize,
) -> EvidenceContext {
    let mut entries = Vec::new();
    let mut counted = 0usize;

    for candidate in candidates {
        let snippet = truncate_chars(&collapse_newlines(candidate.text.trim()), snippet_chars);
        counted += snippet.chars().count();
        entries.push(ContextEntry {
            fragment_id: candidate.fragment_id.clone(),
            header: header_for(candidate),
            snippet,
        });
        if counted > max_chars {
            break;
        }
    }

    EvidenceContext { entries }
}

/// Header encoding fragment id, asset, and page; an unknown page renders
/// as `-`.
fn header_for(candidate: &Candidate) -> String {
    let page = candidate
        .meta
        .page
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[evidence:{} asset:{} p:{}]",
        candidate.fragment_id, candidate.meta.asset, page
    )
}
