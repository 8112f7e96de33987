//! HTTP client for the cross-encoder rerank service.
//!
//! The service scores (query, text) pairs and returns results sorted by
//! score descending; the client restores request order so `score` keeps
//! its same-length, same-order contract.

use std::time::Duration;

use dossier_core::config::RerankConfig;
use dossier_core::errors::{DossierResult, RerankError};
use dossier_core::traits::IRerankClient;
use tracing::debug;

use crate::protocol::{RerankCandidate, RerankRequest, RerankResponse, RerankResult};

pub struct HttpRerankClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRerankClient {
    pub fn new(config: &RerankConfig) -> DossierResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RerankError::Unreachable {
                reason: format!("client init: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl IRerankClient for HttpRerankClient {
    fn score(&self, query: &str, texts: &[String]) -> DossierResult<Vec<f64>> {
        let url = format!("{}/rerank", self.endpoint);
        let request = RerankRequest {
            query,
            candidates: texts
                .iter()
                .enumerate()
                .map(|(i, text)| RerankCandidate {
                    id: i.to_string(),
                    text,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| RerankError::Unreachable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RerankError::Unreachable {
                reason: format!("status {}", response.status().as_u16()),
            }
            .into());
        }

        let body: RerankResponse =
            response.json().map_err(|e| RerankError::MalformedResponse {
                reason: format!("decode: {e}"),
            })?;

        let scores = scores_in_request_order(&body.results, texts.len())?;
        debug!(pairs = texts.len(), "rerank batch scored");
        Ok(scores)
    }
}

/// Map the service's score-sorted results back to request order. Every
/// request index must be present exactly once.
fn scores_in_request_order(results: &[RerankResult], len: usize) -> DossierResult<Vec<f64>> {
    if results.len() != len {
        return Err(RerankError::ScoreCountMismatch {
            sent: len,
            got: results.len(),
        }
        .into());
    }

    let mut scores = vec![None; len];
    for result in results {
        let idx: usize = result
            .id
            .parse()
            .map_err(|_| RerankError::MalformedResponse {
                reason: format!("non-numeric result id {:?}", result.id),
            })?;
        if idx >= len || scores[idx].is_some() {
            return Err(RerankError::MalformedResponse {
                reason: format!("result id {idx} out of range or duplicated"),
            }
            .into());
        }
        scores[idx] = Some(result.score);
    }

    // All slots are filled: len matches and no index repeated.
    Ok(scores.into_iter().map(|s| s.unwrap_or(0.0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, score: f64) -> RerankResult {
        RerankResult {
            id: id.to_string(),
            score,
        }
    }

    #[test]
    fn restores_request_order_from_sorted_results() {
        // Service returns score-descending; request order was 0, 1, 2.
        let results = vec![result("2", 0.9), result("0", 0.5), result("1", 0.1)];
        let scores = scores_in_request_order(&results, 3).unwrap();
        assert_eq!(scores, vec![0.5, 0.1, 0.9]);
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let results = vec![result("0", 0.5)];
        assert!(scores_in_request_order(&results, 2).is_err());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let results = vec![result("0", 0.5), result("0", 0.4)];
        assert!(scores_in_request_order(&results, 2).is_err());
    }

    #[test]
    fn out_of_range_id_is_rejected() {
        let results = vec![result("0", 0.5), result("7", 0.4)];
        assert!(scores_in_request_order(&results, 2).is_err());
    }
}
