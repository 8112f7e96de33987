use crate::errors::DossierResult;

/// Text-generation backend. Failure is recoverable: the composer falls
/// back to an extractive summary.
pub trait IGenerationClient: Send + Sync {
    /// Send a composed prompt, return the completion text.
    fn complete(&self, prompt: &str, max_tokens: u32) -> DossierResult<String>;
}
