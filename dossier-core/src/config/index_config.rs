use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index (ANN) client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Base URL of the vector index REST API.
    pub endpoint: String,
    /// Collection names are `{prefix}{case_id}`.
    pub collection_prefix: String,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
}

impl IndexConfig {
    /// Collection name for a case.
    pub fn collection_for(&self, case_id: &str) -> String {
        format!("{}{}", self.collection_prefix, case_id)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_INDEX_ENDPOINT.to_string(),
            collection_prefix: defaults::DEFAULT_COLLECTION_PREFIX.to_string(),
            timeout_secs: defaults::DEFAULT_INDEX_TIMEOUT_SECS,
        }
    }
}
