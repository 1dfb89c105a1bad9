// Public API exports
pub mod clusterer;
pub mod config;
pub mod consensus;
pub mod correlation;
pub mod embedder;
pub mod error;
pub mod io;
pub mod matrix;
pub mod ordering;
pub mod pipeline;
pub mod rounds;

// Re-export main types for convenience
pub use error::{AnalysisError, Result};

pub use rounds::{parse_round_log, Group, ItemId, Round, RoundStore};

pub use consensus::{aggregate, AggregateStats, Consensus, NORM_MAX_DISTANCE};

pub use matrix::{euclidean_matrix, DissimilarityMatrix};

pub use embedder::{embed, EmbeddedPoint, Embedding, MdsConfig};

pub use clusterer::{cluster, cluster_many, ClusterLabeling, DEFAULT_CLUSTER_COUNT};

pub use correlation::{correlate, Correlation, PairedDistance};

pub use ordering::OrderStrategy;

pub use config::PipelineConfig;
