use crate::clusterer::DEFAULT_CLUSTER_COUNT;
use crate::embedder::MdsConfig;
use serde::{Deserialize, Serialize};

/// Matrix multiplier used when projecting a consensus matrix
pub const CONSENSUS_PROJECTION_SCALE: f64 = 2.0;

/// Matrix multiplier used when projecting a feature-derived matrix
pub const FEATURE_PROJECTION_SCALE: f64 = 1.0;

/// Settings shared by the consensus and feature pipelines
///
/// Clustering always runs on the unscaled matrix; `mds.scale` applies to the
/// projection only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// One clustering line is produced per entry
    pub cluster_counts: Vec<usize>,
    pub mds: MdsConfig,
    /// Column holding item ids in a feature table
    pub id_column: String,
    /// Feature-table columns that are not features
    pub ignore_columns: Vec<String>,
}

impl PipelineConfig {
    /// Defaults for projecting a consensus matrix
    pub fn consensus() -> Self {
        Self {
            cluster_counts: vec![DEFAULT_CLUSTER_COUNT],
            mds: MdsConfig::default().with_scale(CONSENSUS_PROJECTION_SCALE),
            id_column: "file".to_string(),
            ignore_columns: vec!["group".to_string()],
        }
    }

    /// Defaults for projecting a feature-derived matrix
    pub fn features() -> Self {
        Self {
            mds: MdsConfig::default().with_scale(FEATURE_PROJECTION_SCALE),
            ..Self::consensus()
        }
    }

    pub fn cluster_counts(mut self, counts: Vec<usize>) -> Self {
        self.cluster_counts = counts;
        self
    }

    pub fn projection_scale(mut self, scale: f64) -> Self {
        self.mds.scale = scale;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.mds.seed = seed;
        self
    }

    pub fn mds(mut self, mds: MdsConfig) -> Self {
        self.mds = mds;
        self
    }

    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }

    pub fn ignore_columns(mut self, columns: Vec<String>) -> Self {
        self.ignore_columns = columns;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::consensus()
    }
}
