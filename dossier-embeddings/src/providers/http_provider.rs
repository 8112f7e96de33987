//! Remote embedding provider speaking the OpenAI-style `/embeddings` API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dossier_core::config::EmbeddingConfig;
use dossier_core::errors::{DossierResult, EmbeddingError};
use dossier_core::traits::IEmbeddingProvider;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// HTTP embedding provider. The client is built once and reused.
pub struct HttpEmbeddingProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    dimensions: usize,
}

impl HttpEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> DossierResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("client init: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }
}

impl IEmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> DossierResult<Vec<f32>> {
        let url = format!("{}/embeddings", self.endpoint);
        let request = EmbedRequest {
            model: &self.model,
            input: vec![text],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("{}: {e}", self.name()),
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("status {}", response.status().as_u16()),
            }
            .into());
        }

        let body: EmbedResponse =
            response
                .json()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("decode: {e}"),
                })?;

        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "empty data array".to_string(),
            })?;

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "http-embeddings"
    }

    fn is_available(&self) -> bool {
        true
    }
}
