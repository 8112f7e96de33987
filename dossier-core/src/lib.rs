//! # dossier-core
//!
//! Foundation crate for the dossier question-answering pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::DossierConfig;
pub use errors::{DossierError, DossierResult};
pub use models::{Answer, Candidate, Citation, EvidenceContext, Fragment, FragmentMeta};
