use crate::clusterer::types::ClusterLabeling;
use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;
use std::collections::BTreeMap;

/// Cluster count used by the study outputs
pub const DEFAULT_CLUSTER_COUNT: usize = 20;

/// Complete-linkage agglomerative clustering on a precomputed matrix
///
/// Repeatedly merges the two clusters whose farthest members are closest
/// until `k` clusters remain. Ties go to the pair whose representatives
/// (the smallest item id of each cluster) come first in ascending id order,
/// whatever order the matrix lists its items in.
pub fn cluster(matrix: &DissimilarityMatrix, k: usize) -> Result<ClusterLabeling> {
    let mut labelings = cluster_many(matrix, &[k])?;
    labelings
        .pop()
        .ok_or(AnalysisError::InvalidClusterCount {
            requested: k,
            items: matrix.len(),
        })
}

/// One labeling per requested cluster count, from a single merge sequence
///
/// Results are returned in the order of `ks`.
pub fn cluster_many(matrix: &DissimilarityMatrix, ks: &[usize]) -> Result<Vec<ClusterLabeling>> {
    let n = matrix.len();
    for &k in ks {
        if k == 0 || k > n {
            return Err(AnalysisError::InvalidClusterCount {
                requested: k,
                items: n,
            });
        }
    }

    let Some(&lowest) = ks.iter().min() else {
        return Ok(Vec::new());
    };

    let mut agglomeration = Agglomeration::new(matrix);
    let mut snapshots: BTreeMap<usize, ClusterLabeling> = BTreeMap::new();

    loop {
        let remaining = agglomeration.remaining;
        if ks.contains(&remaining) && !snapshots.contains_key(&remaining) {
            snapshots.insert(remaining, agglomeration.labeling(matrix));
        }
        if remaining <= lowest {
            break;
        }
        agglomeration.merge_closest();
    }

    tracing::debug!(items = n, counts = ?ks, "complete-linkage clustering finished");

    Ok(ks.iter().map(|k| snapshots[k].clone()).collect())
}

/// Merge state: each live slot holds one cluster
struct Agglomeration {
    n: usize,
    /// Complete-linkage distance between live slots
    dist: Vec<f64>,
    /// Slot each item currently belongs to
    slot_of: Vec<usize>,
    /// Smallest id rank among the members of each slot
    rep_rank: Vec<usize>,
    active: Vec<bool>,
    remaining: usize,
}

impl Agglomeration {
    fn new(matrix: &DissimilarityMatrix) -> Self {
        let n = matrix.len();
        let mut dist = vec![0.0; n * n];
        for i in 0..n {
            dist[i * n..(i + 1) * n].copy_from_slice(matrix.row(i));
        }

        let items = matrix.items();
        let mut by_id: Vec<usize> = (0..n).collect();
        by_id.sort_by(|&a, &b| items[a].cmp(&items[b]));
        let mut rep_rank = vec![0; n];
        for (rank, &i) in by_id.iter().enumerate() {
            rep_rank[i] = rank;
        }

        Self {
            n,
            dist,
            slot_of: (0..n).collect(),
            rep_rank,
            active: vec![true; n],
            remaining: n,
        }
    }

    /// Representative ranks of two slots, lower first
    fn tie_key(&self, a: usize, b: usize) -> (usize, usize) {
        let (ra, rb) = (self.rep_rank[a], self.rep_rank[b]);
        (ra.min(rb), ra.max(rb))
    }

    fn merge_closest(&mut self) {
        let n = self.n;
        let mut best: Option<(usize, usize, f64)> = None;

        for i in (0..n).filter(|&i| self.active[i]) {
            for j in ((i + 1)..n).filter(|&j| self.active[j]) {
                let d = self.dist[i * n + j];
                let better = match best {
                    None => true,
                    Some((bi, bj, b)) => d < b || (d == b && self.tie_key(i, j) < self.tie_key(bi, bj)),
                };
                if better {
                    best = Some((i, j, d));
                }
            }
        }

        let Some((i, j, _)) = best else {
            return;
        };
        // the merged cluster lives on in the slot of the smaller representative
        let (keep, absorb) = if self.rep_rank[i] < self.rep_rank[j] {
            (i, j)
        } else {
            (j, i)
        };

        for m in (0..n).filter(|&m| self.active[m] && m != keep && m != absorb) {
            let d = self.dist[keep * n + m].max(self.dist[absorb * n + m]);
            self.dist[keep * n + m] = d;
            self.dist[m * n + keep] = d;
        }

        self.active[absorb] = false;
        for slot in self.slot_of.iter_mut() {
            if *slot == absorb {
                *slot = keep;
            }
        }
        self.remaining -= 1;
    }
    fn labeling(&self, matrix: &DissimilarityMatrix) -> ClusterLabeling {
        let mut label_of_slot: Vec<Option<usize>> = vec![None; self.n];
        let mut next = 0;
        let labels = self
            .slot_of
            .iter()
            .map(|&slot| {
                *label_of_slot[slot].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect();

        ClusterLabeling {
            k: self.remaining,
            items: matrix.items().to_vec(),
            labels,
        }
    }
}
