//! OpenAI-compatible chat-completion client for the generation backend.

use std::time::Duration;

use dossier_core::config::GenerationConfig;
use dossier_core::errors::{DossierResult, GenerationError};
use dossier_core::traits::IGenerationClient;
use tracing::debug;

use crate::protocol::{ChatMessage, ChatRequest};

/// System role instruction sent with every completion request.
const SYSTEM_PROMPT: &str = "You are a legal writing assistant. Ground every \
factual statement in the provided case material and close with a citation list.";

pub struct HttpGenerationClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl HttpGenerationClient {
    pub fn new(config: &GenerationConfig) -> DossierResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Unreachable {
                reason: format!("client init: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

impl IGenerationClient for HttpGenerationClient {
    fn complete(&self, prompt: &str, max_tokens: u32) -> DossierResult<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| GenerationError::Unreachable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        let body: serde_json::Value =
            response
                .json()
                .map_err(|e| GenerationError::MalformedResponse {
                    reason: format!("decode: {e}"),
                })?;

        let text = extract_completion(&body).ok_or_else(|| GenerationError::MalformedResponse {
            reason: "no completion text in response".to_string(),
        })?;

        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}

/// Pull completion text out of the common response schemas:
/// `choices[0].message.content` (chat), then `data[0].text` (legacy).
fn extract_completion(body: &serde_json::Value) -> Option<String> {
    if let Some(content) = body
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
    {
        return Some(content.to_string());
    }
    if let Some(text) = body
        .get("data")
        .and_then(|d| d.get(0))
        .and_then(|d| d.get("text"))
        .and_then(|t| t.as_str())
    {
        return Some(text.to_string());
    }
    None
}
