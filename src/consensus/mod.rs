mod aggregator;
mod tally;

#[cfg(test)]
mod tests;

pub use aggregator::{aggregate, AggregateStats, Consensus};

/// Distance assigned to pairs never grouped together
pub const NORM_MAX_DISTANCE: f64 = 100.0;
