// model.rs - settings for the stress-majorization projection
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdsConfig {
    /// Multiplier applied to every matrix value before projecting
    pub scale: f64,
    /// Seed for the ChaCha8 stream that draws every random start
    pub seed: u64,
    /// Number of random starts; the lowest-stress run wins
    pub n_init: usize,
    pub max_iter: usize,
    /// Stop once normalized stress improves by less than this
    pub eps: f64,
}

impl MdsConfig {
    pub fn new(scale: f64, seed: u64) -> Self {
        Self {
            scale,
            seed,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }
}

impl Default for MdsConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            seed: 0,
            n_init: 4,
            max_iter: 300,
            eps: 1e-3,
        }
    }
}
