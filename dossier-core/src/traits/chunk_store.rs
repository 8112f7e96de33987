use crate::errors::DossierResult;
use crate::models::Fragment;

/// Read access to persisted text fragments, scoped to a case.
pub trait IChunkStore: Send + Sync {
    /// Batch-fetch fragments by id. Ids with no stored fragment are simply
    /// absent from the result; the order of returned fragments is not
    /// guaranteed to match the input order.
    fn get_by_ids(&self, ids: &[String]) -> DossierResult<Vec<Fragment>>;

    /// Full-text search over a case's fragments. Results are scoped
    /// strictly to `case_id` and ranked by lexical relevance.
    fn lexical_search(
        &self,
        case_id: &str,
        query: &str,
        limit: usize,
    ) -> DossierResult<Vec<Fragment>>;

    /// The case's merged parsed text, if ingestion produced one.
    fn merged_text(&self, case_id: &str) -> DossierResult<Option<String>>;
}
