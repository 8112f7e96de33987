use serde::{Deserialize, Serialize};

/// Provenance metadata for a fragment: the source asset it was extracted
/// from and, when known, the page within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMeta {
    pub asset: String,
    #[serde(default)]
    pub page: Option<u32>,
}

/// A unit of previously extracted case text with known provenance.
///
/// Immutable once produced by ingestion; owned by the fragment store.
/// `id` is globally unique within a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub id: String,
    pub case_id: String,
    pub text: String,
    pub meta: FragmentMeta,
    /// Embedding vector, present only when ingestion produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl Fragment {
    pub fn new(id: &str, case_id: &str, text: &str, asset: &str, page: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            case_id: case_id.to_string(),
            text: text.to_string(),
            meta: FragmentMeta {
                asset: asset.to_string(),
                page,
            },
            vector: None,
        }
    }
}
