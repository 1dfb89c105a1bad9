mod linkage;
mod types;


pub use linkage::{cluster, cluster_many, DEFAULT_CLUSTER_COUNT};
pub use types::ClusterLabeling;
