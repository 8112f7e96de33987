use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// Which retrieval stage produced the candidate list. The fallback chain
/// is strict: the first producing stage wins and later stages never run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalStage {
    /// ANN vector search hits, hydrated from the fragment store.
    VectorIndex,
    /// Case-scoped lexical full-text search.
    Lexical,
    /// Single synthetic candidate built from the case's merged parsed text.
    MergedText,
    /// Nothing retrievable for this case.
    Empty,
}

/// Result of one `retrieve` call: the winning stage and its candidates.
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    pub stage: RetrievalStage,
    pub candidates: Vec<Candidate>,
}

impl RetrievalOutcome {
    pub fn empty() -> Self {
        Self {
            stage: RetrievalStage::Empty,
            candidates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
