use crate::errors::DossierResult;
use crate::models::QueryLogEntry;

/// Append-only sink for answered questions. No ordering guarantee among
/// concurrent writers beyond atomic append.
pub trait IQueryLog: Send + Sync {
    fn append(&self, entry: &QueryLogEntry) -> DossierResult<()>;
}
