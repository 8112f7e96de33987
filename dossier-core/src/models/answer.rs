use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// A provenance pointer from an answer back to an originating fragment.
/// Read-only projection of the fragment's identity and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub fragment_id: String,
    pub asset: String,
    #[serde(default)]
    pub page: Option<u32>,
}

impl Citation {
    /// Project a citation from a final candidate.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            fragment_id: candidate.fragment_id.clone(),
            asset: candidate.meta.asset.clone(),
            page: candidate.meta.page,
        }
    }
}

/// The sole externally returned artifact of the pipeline.
/// Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub citations: Vec<Citation>,
}
