use serde::{Deserialize, Serialize};

/// One annotated evidence block in the assembled context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub fragment_id: String,
    /// Header line encoding fragment id, asset, and page.
    pub header: String,
    /// Fragment text, newline-collapsed and truncated.
    pub snippet: String,
}

/// The size-bounded, ordered evidence context built fresh per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceContext {
    pub entries: Vec<ContextEntry>,
}

impl EvidenceContext {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fragment ids present in the context. The citation set of any answer
    /// built from this context must be a subset of these.
    pub fn fragment_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.fragment_id.as_str()).collect()
    }

    /// Render the context block inserted into the generation prompt.
    pub fn render(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}\n{}\n", e.header, e.snippet))
            .collect();
        parts.join("\n\n")
    }
}
