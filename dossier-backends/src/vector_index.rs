//! HTTP vector index client (Milvus-style REST API).

use std::time::Duration;

use dossier_core::config::IndexConfig;
use dossier_core::errors::{DossierResult, IndexError};
use dossier_core::traits::{IVectorIndex, VectorHit};
use tracing::debug;

use crate::protocol::{
    HasCollectionRequest, HasCollectionResponse, VectorSearchRequest, VectorSearchResponse,
};

/// Vector field name used by the indexing pipeline.
const ANNS_FIELD: &str = "embedding";

/// Output field carrying the fragment id alongside each hit.
const FRAGMENT_ID_FIELD: &str = "fragment_id";

pub struct HttpVectorIndex {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpVectorIndex {
    pub fn new(config: &IndexConfig) -> DossierResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IndexError::Unreachable {
                reason: format!("client init: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl IVectorIndex for HttpVectorIndex {
    fn has_collection(&self, name: &str) -> DossierResult<bool> {
        let url = format!("{}/v2/vectordb/collections/has", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&HasCollectionRequest {
                collection_name: name,
            })
            .send()
            .map_err(|e| IndexError::Unreachable {
                reason: e.to_string(),
            })?;

        let body: HasCollectionResponse =
            response.json().map_err(|e| IndexError::MalformedResponse {
                reason: format!("has-collection decode: {e}"),
            })?;

        // A non-zero code means the service answered but could not resolve
        // the collection; treat that as absent, not as an error.
        Ok(body.code == 0 && body.data.has)
    }

    fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
    ) -> DossierResult<Vec<VectorHit>> {
        let url = format!("{}/v2/vectordb/entities/search", self.endpoint);
        let request = VectorSearchRequest {
            collection_name: collection,
            data: vec![query_vector],
            anns_field: ANNS_FIELD,
            limit,
            output_fields: vec![FRAGMENT_ID_FIELD],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| IndexError::Unreachable {
                reason: e.to_string(),
            })?;

        let body: VectorSearchResponse =
            response.json().map_err(|e| IndexError::MalformedResponse {
                reason: format!("search decode: {e}"),
            })?;

        if body.code != 0 {
            return Err(IndexError::SearchFailed {
                reason: format!("service code {}", body.code),
            }
            .into());
        }

        let hits = parse_hits(&body.data);
        debug!(collection, hits = hits.len(), "vector search complete");
        Ok(hits)
    }
}

/// Extract (fragment_id, score) pairs from raw hit objects. Hits missing
/// both a `fragment_id` output field and a primary `id` are dropped.
fn parse_hits(raw: &[serde_json::Value]) -> Vec<VectorHit> {
    raw.iter()
        .filter_map(|hit| {
            let fragment_id = match hit.get(FRAGMENT_ID_FIELD).and_then(|v| v.as_str()) {
                Some(id) => id.to_string(),
                // Schemas without the output field fall back to the primary key.
                None => match hit.get("id") {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Number(n)) => n.to_string(),
                    _ => return None,
                },
            };
            let score = hit
                .get("distance")
                .or_else(|| hit.get("score"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            Some(VectorHit { fragment_id, score })
        })
        .collect()
}
