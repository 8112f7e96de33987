//! Vector normalization and dimension checks.

use dossier_core::errors::{DossierResult, EmbeddingError};

/// L2-normalize a vector in place. A zero vector is left unchanged.
pub fn l2_normalize(vec: &mut [f32]) {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vec.iter_mut() {
            *v /= norm;
        }
    }
}

/// Reject embeddings whose dimensionality differs from the configured one.
pub fn validate_dimensions(vec: &[f32], expected: usize) -> DossierResult<()> {
    if vec.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            got: vec.len(),
        }
        .into());
    }
    Ok(())
}
