use crate::embedder::{
    model::MdsConfig,
    types::{EmbeddedPoint, Embedding},
};
use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;

/// Layout distances below this are replaced to keep the Guttman ratio finite
const MIN_LAYOUT_DISTANCE: f64 = 1e-5;

/// Project a dissimilarity matrix into 2-D with metric SMACOF
///
/// Targets are `config.scale * matrix[i][j]`. Each of `config.n_init` starts
/// is drawn from one seeded ChaCha8 stream, so identical inputs and seeds
/// produce identical coordinates.
pub fn embed(matrix: &DissimilarityMatrix, config: &MdsConfig) -> Result<Embedding> {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let n = matrix.len();
    if n < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "embedding needs at least 2 items, got {}",
            n
        )));
    }
    if !config.scale.is_finite() || config.scale <= 0.0 {
        return Err(AnalysisError::DegenerateInput(format!(
            "projection scale must be positive, got {}",
            config.scale
        )));
    }

    let mut targets = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            targets[i * n + j] = config.scale * matrix.get(i, j);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut best: Option<Run> = None;

    for start in 0..config.n_init.max(1) {
        let run = smacof_single(&targets, n, config, &mut rng);
        tracing::debug!(
            start,
            stress = run.stress,
            iterations = run.iterations,
            "smacof start finished"
        );
        if best.as_ref().map_or(true, |b| run.stress < b.stress) {
            best = Some(run);
        }
    }

    let best = best.ok_or_else(|| AnalysisError::DegenerateInput("no MDS run completed".into()))?;

    let points = matrix
        .items()
        .iter()
        .zip(best.coords.iter())
        .map(|(id, p)| EmbeddedPoint {
            id: id.clone(),
            x: p[0],
            y: p[1],
        })
        .collect();

    Ok(Embedding {
        points,
        stress: best.stress,
        iterations: best.iterations,
    })
}

struct Run {
    coords: Vec<[f64; 2]>,
    stress: f64,
    iterations: usize,
}

fn smacof_single(targets: &[f64], n: usize, config: &MdsConfig, rng: &mut impl rand::Rng) -> Run {
    // 1. Uniform random start in the unit square
    let mut coords: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();
    let mut old_stress: Option<f64> = None;
    let mut iterations = 0;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dist = layout_distances(&coords);
        let stress = raw_stress(&dist, targets, n);

        // 2. Guttman transform: X <- B(X) X / n
        let mut next = vec![[0.0f64; 2]; n];
        for i in 0..n {
            let mut diag = 0.0;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = dist[i * n + j];
                let ratio = targets[i * n + j] / if d == 0.0 { MIN_LAYOUT_DISTANCE } else { d };
                diag += ratio;
                next[i][0] -= ratio * coords[j][0];
                next[i][1] -= ratio * coords[j][1];
            }
            next[i][0] = (next[i][0] + diag * coords[i][0]) / n as f64;
            next[i][1] = (next[i][1] + diag * coords[i][1]) / n as f64;
        }
        coords = next;

        // 3. Converged once normalized stress stops improving
        let norm: f64 = coords.iter().map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt()).sum();
        if norm == 0.0 {
            break;
        }
        let normalized = stress / norm;
        if let Some(old) = old_stress {
            if old - normalized < config.eps {
                break;
            }
        }
        old_stress = Some(normalized);
    }

    let stress = raw_stress(&layout_distances(&coords), targets, n);
    Run {
        coords,
        stress,
        iterations,
    }
}

fn layout_distances(coords: &[[f64; 2]]) -> Vec<f64> {
    let n = coords.len();
    let mut dist = vec![0.0; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = coords[i][0] - coords[j][0];
            let dy = coords[i][1] - coords[j][1];
            let d = (dx * dx + dy * dy).sqrt();
            dist[i * n + j] = d;
            dist[j * n + i] = d;
        }
    }
    dist
}

/// Sum over unordered pairs of squared layout-vs-target error
fn raw_stress(dist: &[f64], targets: &[f64], n: usize) -> f64 {
    let mut stress = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let e = dist[i * n + j] - targets[i * n + j];
            stress += e * e;
        }
    }
    stress
}
