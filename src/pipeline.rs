use crate::clusterer::{cluster_many, ClusterLabeling};
use crate::config::PipelineConfig;
use crate::consensus::aggregate;
use crate::correlation::{correlate, Correlation};
use crate::embedder::{embed, Embedding};
use crate::error::AnalysisError;
use crate::io::{
    read_feature_table, read_matrix, write_clustering, write_matrix, write_pairs,
    write_projection, RunManifest,
};
use crate::matrix::{euclidean_matrix, DissimilarityMatrix};
use crate::rounds::parse_round_log;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Projection and clustering of one matrix; each stage succeeds or fails alone
#[derive(Debug)]
pub struct Analysis {
    pub embedding: std::result::Result<Embedding, AnalysisError>,
    pub labelings: std::result::Result<Vec<ClusterLabeling>, AnalysisError>,
}

impl Analysis {
    pub fn run(matrix: &DissimilarityMatrix, config: &PipelineConfig) -> Self {
        let embedding = embed(matrix, &config.mds);
        match &embedding {
            Ok(e) => tracing::info!(
                items = e.len(),
                stress = e.stress,
                iterations = e.iterations,
                "projected matrix"
            ),
            Err(e) => tracing::error!(error = %e, "projection failed"),
        }

        let labelings = cluster_many(matrix, &config.cluster_counts);
        match &labelings {
            Ok(l) => tracing::info!(configurations = l.len(), "clustered matrix"),
            Err(e) => tracing::error!(error = %e, "clustering failed"),
        }

        Self {
            embedding,
            labelings,
        }
    }

    /// `stage: error` for every failed stage
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if let Err(e) = &self.embedding {
            failures.push(format!("projection: {}", e));
        }
        if let Err(e) = &self.labelings {
            failures.push(format!("clustering: {}", e));
        }
        failures
    }
}

/// Destination files for the consensus pipeline
#[derive(Debug, Clone)]
pub struct ConsensusOutputs {
    pub matrix: PathBuf,
    pub projection: PathBuf,
    pub clustering: PathBuf,
    pub manifest: Option<PathBuf>,
}

/// Destination files for the feature pipeline
#[derive(Debug, Clone)]
pub struct FeatureOutputs {
    pub projection: PathBuf,
    pub clustering: PathBuf,
    pub pairs: Option<PathBuf>,
}

/// What a run produced; `failures` lists stages that did not
#[derive(Debug)]
pub struct RunReport {
    pub manifest: RunManifest,
    pub correlation: Option<Correlation>,
}

impl RunReport {
    /// Turn recorded stage failures into an error for the process boundary
    pub fn ensure_complete(&self) -> Result<()> {
        if self.manifest.failures.is_empty() {
            return Ok(());
        }
        bail!(
            "{} stage(s) failed: {}",
            self.manifest.failures.len(),
            self.manifest.failures.join("; ")
        )
    }
}

/// Round log text -> matrix, projection, clustering (and manifest)
///
/// Parsing and aggregation failures are fatal. Projection and clustering run
/// independently; whatever succeeds is written and failures are recorded.
pub fn run_consensus(
    log_text: &str,
    source: Option<String>,
    config: &PipelineConfig,
    outputs: &ConsensusOutputs,
) -> Result<RunReport> {
    let rounds = parse_round_log(log_text).context("Failed to read round log")?;
    let consensus = aggregate(&rounds).context("Failed to aggregate rounds")?;
    let matrix = &consensus.matrix;

    write_file(&outputs.matrix, |out| write_matrix(out, matrix))?;

    let analysis = Analysis::run(matrix, config);
    if let Ok(embedding) = &analysis.embedding {
        write_file(&outputs.projection, |out| write_projection(out, embedding))?;
    }
    if let Ok(labelings) = &analysis.labelings {
        write_file(&outputs.clustering, |out| write_clustering(out, labelings))?;
    }

    let mut manifest = RunManifest::new(source, matrix.fingerprint(), config.mds.clone());
    manifest.stats = Some(consensus.stats.clone());
    manifest.item_count = matrix.len();
    manifest.cluster_counts = config.cluster_counts.clone();
    manifest.projection_stress = analysis.embedding.as_ref().ok().map(|e| e.stress);
    manifest.failures = analysis.failures();

    if let Some(path) = &outputs.manifest {
        manifest.write_to_file(path)?;
    }

    tracing::info!(
        fingerprint = %manifest.matrix_fingerprint,
        failures = manifest.failures.len(),
        "consensus run finished"
    );

    Ok(RunReport {
        manifest,
        correlation: None,
    })
}

/// Feature table text -> Euclidean matrix -> projection, clustering
///
/// With `compare_text` (a matrix CSV, usually the consensus matrix) the two
/// distance spaces are correlated as well.
pub fn run_features(
    table_text: &str,
    compare_text: Option<&str>,
    source: Option<String>,
    config: &PipelineConfig,
    outputs: &FeatureOutputs,
) -> Result<RunReport> {
    let table = read_feature_table(table_text, &config.id_column, &config.ignore_columns)
        .context("Failed to read feature table")?;
    tracing::info!(
        items = table.ids.len(),
        features = table.columns.len(),
        "loaded feature table"
    );

    let matrix = euclidean_matrix(table.ids.clone(), &table.rows)
        .context("Failed to compute feature distances")?;

    let analysis = Analysis::run(&matrix, config);
    if let Ok(embedding) = &analysis.embedding {
        write_file(&outputs.projection, |out| write_projection(out, embedding))?;
    }
    if let Ok(labelings) = &analysis.labelings {
        write_file(&outputs.clustering, |out| write_clustering(out, labelings))?;
    }

    let mut manifest = RunManifest::new(source, matrix.fingerprint(), config.mds.clone());
    manifest.item_count = matrix.len();
    manifest.cluster_counts = config.cluster_counts.clone();
    manifest.projection_stress = analysis.embedding.as_ref().ok().map(|e| e.stress);
    manifest.failures = analysis.failures();

    let mut correlation = None;
    if let Some(text) = compare_text {
        let reference = read_matrix(text).context("Failed to read comparison matrix")?;
        match correlate(&matrix, &reference) {
            Ok(result) => {
                if let Some(path) = &outputs.pairs {
                    write_file(path, |out| write_pairs(out, &result.pairs))?;
                }
                correlation = Some(result);
            }
            Err(e) => {
                tracing::error!(error = %e, "correlation failed");
                manifest.failures.push(format!("correlation: {}", e));
            }
        }
    }

    Ok(RunReport {
        manifest,
        correlation,
    })
}

/// Pearson correlation between two matrix CSV files
pub fn correlate_files(first: &Path, second: &Path) -> Result<Correlation> {
    let a = read_matrix(&read_text(first)?)
        .with_context(|| format!("Failed to parse matrix: {}", first.display()))?;
    let b = read_matrix(&read_text(second)?)
        .with_context(|| format!("Failed to parse matrix: {}", second.display()))?;
    Ok(correlate(&a, &b)?)
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote output");
    Ok(())
}
