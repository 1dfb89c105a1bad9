use crate::error::{AnalysisError, Result};
use crate::rounds::ItemId;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Tolerance used when validating externally supplied matrices
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Dense, immutable, symmetric distance matrix over an ordered item list
///
/// Invariants: zero diagonal, `get(i, j) == get(j, i)`, every value finite
/// and non-negative. There is no mutation API; a matrix is built once by the
/// consensus aggregator, the Euclidean feature path, or the CSV reader.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix {
    items: Vec<ItemId>,
    index: HashMap<ItemId, usize>,
    /// Row-major `n * n` values
    values: Vec<f64>,
}

impl DissimilarityMatrix {
    /// Build from a pairwise function evaluated on the upper triangle
    ///
    /// `items` must be unique; callers inside the crate guarantee this.
    pub(crate) fn from_fn(items: Vec<ItemId>, mut distance: impl FnMut(usize, usize) -> f64) -> Self {
        let n = items.len();
        let mut values = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(i, j);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }

        let index = items
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self {
            items,
            index,
            values,
        }
    }

    /// Build from externally supplied square rows, validating every invariant
    ///
    /// Errors report `line` as the 1-based row number.
    pub fn from_rows(items: Vec<ItemId>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = items.len();
        ensure_unique(&items)?;

        if rows.len() != n {
            return Err(AnalysisError::MalformedTable {
                line: rows.len().min(n) + 1,
                reason: format!("expected {} rows, found {}", n, rows.len()),
            });
        }

        // Every row must be full before symmetry can look across rows
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(AnalysisError::MalformedTable {
                line: i + 1,
                reason: format!("expected {} values, found {}", n, row.len()),
            });
        }

        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() || v < 0.0 {
                    return Err(AnalysisError::MalformedTable {
                        line: i + 1,
                        reason: format!("distance {} -> {} is {}", items[i], items[j], v),
                    });
                }
                if i == j && v != 0.0 {
                    return Err(AnalysisError::MalformedTable {
                        line: i + 1,
                        reason: format!("non-zero diagonal for {}", items[i]),
                    });
                }
                if (v - rows[j][i]).abs() > SYMMETRY_TOLERANCE {
                    return Err(AnalysisError::MalformedTable {
                        line: i + 1,
                        reason: format!("asymmetric distance between {} and {}", items[i], items[j]),
                    });
                }
            }
        }

        // Mirror the upper triangle so the stored matrix is exactly symmetric
        Ok(Self::from_fn(items, |i, j| rows[i][j]))
    }

    /// Item ids in matrix order
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of an item id in matrix order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Distance by position (panics on out-of-range indices, like slice indexing)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.items.len() + j]
    }

    /// Distance by item id
    pub fn distance(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.get(i, j))
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.items.len();
        &self.values[i * n..(i + 1) * n]
    }

    /// Upper triangle (diagonal excluded) in canonical `(i, j)`, `i < j` order
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.items.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.get(i, j))))
    }

    /// SHA-256 over the item ids and the exact bit patterns of every value
    ///
    /// Two matrices share a fingerprint iff they are bit-identical.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for id in &self.items {
            hasher.update((id.len() as u64).to_le_bytes());
            hasher.update(id.as_bytes());
        }
        for v in &self.values {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

pub(crate) fn ensure_unique(items: &[ItemId]) -> Result<()> {
    let mut seen = HashMap::with_capacity(items.len());
    for (i, id) in items.iter().enumerate() {
        if let Some(first) = seen.insert(id.as_str(), i) {
            return Err(AnalysisError::MalformedTable {
                line: i + 1,
                reason: format!("duplicate item id {} (first seen in row {})", id, first + 1),
            });
        }
    }
    Ok(())
}
