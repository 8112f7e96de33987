//! Wire payloads for the backend services — typed serde structs, JSON only.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vector index (Milvus-style REST)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HasCollectionRequest<'a> {
    pub collection_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HasCollectionResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub data: HasCollectionData,
}

#[derive(Debug, Default, Deserialize)]
pub struct HasCollectionData {
    #[serde(default)]
    pub has: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearchRequest<'a> {
    pub collection_name: &'a str,
    /// One query vector per search; the service accepts a batch.
    pub data: Vec<&'a [f32]>,
    pub anns_field: &'a str,
    pub limit: usize,
    pub output_fields: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct VectorSearchResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Cross-encoder rerank service
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RerankRequest<'a> {
    pub query: &'a str,
    pub candidates: Vec<RerankCandidate<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RerankCandidate<'a> {
    pub id: String,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RerankResponse {
    #[serde(default)]
    pub results: Vec<RerankResult>,
}

#[derive(Debug, Deserialize)]
pub struct RerankResult {
    pub id: String,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Generation (OpenAI-compatible chat completions)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}
