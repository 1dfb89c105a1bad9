use crate::consensus::AggregateStats;
use crate::embedder::MdsConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Summary of one pipeline run, written next to the result tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    pub source: Option<String>,
    pub stats: Option<AggregateStats>,
    pub item_count: usize,
    /// SHA-256 of the matrix; equal fingerprints mean bit-identical matrices
    pub matrix_fingerprint: String,
    pub cluster_counts: Vec<usize>,
    pub projection: MdsConfig,
    pub projection_stress: Option<f64>,
    /// Stages that failed while the rest of the run completed
    pub failures: Vec<String>,
}

impl RunManifest {
    pub fn new(source: Option<String>, matrix_fingerprint: String, projection: MdsConfig) -> Self {
        Self {
            version: "1.0.0".to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("consensus-map v{}", env!("CARGO_PKG_VERSION")),
            source,
            stats: None,
            item_count: 0,
            matrix_fingerprint,
            cluster_counts: Vec::new(),
            projection,
            projection_stress: None,
            failures: Vec::new(),
        }
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run manifest")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&text).context("Failed to parse run manifest")
    }
}
