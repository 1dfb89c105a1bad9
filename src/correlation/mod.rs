//! Agreement between two independently derived distance spaces.
//!
//! Used to check a feature-derived distance (e.g. scagnostics rows) against
//! the manually elicited consensus matrix. The coefficient is reported, not
//! judged: a low value is a finding, not an error.

use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;
use crate::rounds::ItemId;
use serde::Serialize;
use std::collections::BTreeSet;


/// One upper-triangle pair with its distance in both matrices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedDistance {
    pub a: ItemId,
    pub b: ItemId,
    pub first: f64,
    pub second: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    /// Pearson coefficient in [-1, 1]
    pub pearson: f64,
    pub pairs: Vec<PairedDistance>,
}

/// Flatten both upper triangles in the canonical pair order of `first`
pub fn paired_distances(
    first: &DissimilarityMatrix,
    second: &DissimilarityMatrix,
) -> Result<Vec<PairedDistance>> {
    ensure_same_domain(first, second)?;

    let items = first.items();
    let mut pairs = Vec::with_capacity(items.len() * items.len().saturating_sub(1) / 2);
    for (i, j, d) in first.upper_triangle() {
        let (a, b) = (&items[i], &items[j]);
        let other = second
            .distance(a, b)
            .ok_or_else(|| AnalysisError::DomainMismatch {
                missing_in_a: Vec::new(),
                missing_in_b: vec![a.clone()],
            })?;
        pairs.push(PairedDistance {
            a: a.clone(),
            b: b.clone(),
            first: d,
            second: other,
        });
    }
    Ok(pairs)
}

/// Pearson correlation between the off-diagonal entries of two matrices
pub fn correlate(first: &DissimilarityMatrix, second: &DissimilarityMatrix) -> Result<Correlation> {
    let pairs = paired_distances(first, second)?;
    let xs: Vec<f64> = pairs.iter().map(|p| p.first).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.second).collect();
    let pearson = pearson(&xs, &ys)?;

    tracing::info!(pairs = pairs.len(), pearson, "correlated distance matrices");

    Ok(Correlation { pearson, pairs })
}

/// Pearson correlation coefficient of two equally long sequences
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::DegenerateInput(format!(
            "sequences differ in length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "correlation needs at least 2 pairs, got {}",
            xs.len()
        )));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "correlation undefined for a constant distance sequence".to_string(),
        ));
    }

    Ok((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

fn ensure_same_domain(first: &DissimilarityMatrix, second: &DissimilarityMatrix) -> Result<()> {
    let a: BTreeSet<&str> = first.items().iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = second.items().iter().map(String::as_str).collect();

    if a == b {
        return Ok(());
    }

    Err(AnalysisError::DomainMismatch {
        missing_in_a: b.difference(&a).map(|s| s.to_string()).collect(),
        missing_in_b: a.difference(&b).map(|s| s.to_string()).collect(),
    })
}
