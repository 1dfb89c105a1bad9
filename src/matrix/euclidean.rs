use super::dissimilarity::{ensure_unique, DissimilarityMatrix};
use crate::error::{AnalysisError, Result};
use crate::rounds::ItemId;

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Pairwise Euclidean distances between numeric feature rows
///
/// This is the feature-vector variant of the pipeline: the result feeds the
/// same embedder and clusterer as a consensus matrix, but values are in the
/// units of the features rather than the consensus [0, 100] range.
pub fn euclidean_matrix(items: Vec<ItemId>, rows: &[Vec<f64>]) -> Result<DissimilarityMatrix> {
    if items.len() != rows.len() {
        return Err(AnalysisError::DegenerateInput(format!(
            "{} item ids for {} feature rows",
            items.len(),
            rows.len()
        )));
    }
    ensure_unique(&items)?;

    if let Some(first) = rows.first() {
        let dim = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(AnalysisError::DegenerateInput(format!(
                    "feature row for {} has {} values, expected {}",
                    items[i],
                    row.len(),
                    dim
                )));
            }
            if let Some(v) = row.iter().find(|v| !v.is_finite()) {
                return Err(AnalysisError::DegenerateInput(format!(
                    "feature row for {} contains non-finite value {}",
                    items[i], v
                )));
            }
        }
    }

    Ok(DissimilarityMatrix::from_fn(items, |i, j| {
        euclidean_distance(&rows[i], &rows[j])
    }))
}
