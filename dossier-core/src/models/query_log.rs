use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answer::Citation;

/// Append-only record of one answered question. Written once per `ask`,
/// never mutated; retention is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub case_id: String,
    pub question: String,
    pub answer: String,
    pub citations: Vec<Citation>,
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    pub fn new(case_id: &str, question: &str, answer: &str, citations: Vec<Citation>) -> Self {
        Self {
            case_id: case_id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            citations,
            timestamp: Utc::now(),
        }
    }
}
