//! Cosine similarity between embedding vectors.

use crate::error::{Result, TubeseekError};

/// Compute cosine similarity between two vectors.
///
/// Returns a score in `[-1, 1]`; values near 1 indicate high semantic
/// relatedness. Fails with `DimensionMismatch` when the vectors have
/// different lengths and with `InvalidVector` when either vector has zero
/// magnitude (cosine is undefined there, and a sentinel 0.0 would be
/// indistinguishable from true orthogonality).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(TubeseekError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(TubeseekError::InvalidVector);
    }

    Ok(dot_product / (norm_a * norm_b))
}
