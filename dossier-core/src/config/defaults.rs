//! Named default values for all config sections.

// Storage
pub const DEFAULT_DB_PATH: &str = "dossier.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// Embedding
pub const DEFAULT_EMBED_ENDPOINT: &str = "http://localhost:8080";
pub const DEFAULT_EMBED_MODEL: &str = "BAAI/bge-large-zh";
pub const DEFAULT_EMBED_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMBED_CACHE_SIZE: u64 = 10_000;

// Vector index
pub const DEFAULT_INDEX_ENDPOINT: &str = "http://localhost:19530";
pub const DEFAULT_COLLECTION_PREFIX: &str = "chunks_";
pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 30;

// Rerank
pub const DEFAULT_RERANK_ENDPOINT: &str = "http://localhost:8100";
pub const DEFAULT_RERANK_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RERANK_CAP: usize = 50;

// Generation
pub const DEFAULT_GENERATION_ENDPOINT: &str = "http://localhost:8000/v1";
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-3.5";
pub const DEFAULT_MAX_TOKENS: u32 = 1_024;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

// Retrieval
pub const DEFAULT_TOP_K: usize = 6;
pub const DEFAULT_LEXICAL_CAP: usize = 200;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 3_000;
pub const DEFAULT_SNIPPET_CHARS: usize = 1_000;
pub const DEFAULT_MERGED_TEXT_CHARS: usize = 5_000;
pub const DEFAULT_FALLBACK_EXCERPT_CHARS: usize = 200;
