use serde::{Deserialize, Serialize};

use super::fragment::{Fragment, FragmentMeta};

/// A transient retrieval candidate: a fragment plus the score assigned by
/// whichever stage last touched it (ANN similarity, lexical default, or
/// cross-encoder). Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub fragment_id: String,
    pub text: String,
    pub meta: FragmentMeta,
    pub score: f64,
}

impl Candidate {
    /// Build a candidate from a hydrated fragment.
    pub fn from_fragment(fragment: &Fragment, score: f64) -> Self {
        Self {
            fragment_id: fragment.id.clone(),
            text: fragment.text.clone(),
            meta: fragment.meta.clone(),
            score,
        }
    }

    /// Whether the candidate carries usable text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}
