/// Dossier system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentinel fragment id for the merged-text retrieval fallback.
pub const MERGED_FRAGMENT_ID: &str = "merged";

/// Asset name attached to the merged-text sentinel candidate.
pub const MERGED_ASSET: &str = "merged";

/// Maximum number of fragment ids in a single batch hydration call.
pub const MAX_HYDRATION_BATCH: usize = 256;
