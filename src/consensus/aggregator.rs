use super::tally::RoundTally;
use super::NORM_MAX_DISTANCE;
use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;
use crate::rounds::{ItemId, RoundStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Counts gathered while aggregating, reported in logs and the run manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub rounds_seen: usize,
    pub rounds_counted: usize,
    pub groups_counted: usize,
    pub groups_excluded: usize,
    pub item_count: usize,
    /// Unordered pairs that co-occurred in at least one round
    pub observed_pairs: usize,
}

/// Output of the consensus aggregation
#[derive(Debug, Clone)]
pub struct Consensus {
    pub matrix: DissimilarityMatrix,
    pub stats: AggregateStats,
}

impl Consensus {
    /// Sorted item ids covered by the matrix
    pub fn items(&self) -> &[ItemId] {
        self.matrix.items()
    }
}

/// Aggregate grouping rounds into a consensus dissimilarity matrix
///
/// Every valid round contributes its round-local co-occurrence distance for
/// each pair it grouped together; the sums are divided by the number of valid
/// rounds and scaled to [0, 100]. Pairs never grouped together in any round
/// sit at the maximum distance of 100.
pub fn aggregate(rounds: &RoundStore) -> Result<Consensus> {
    let mut stats = AggregateStats {
        rounds_seen: rounds.len(),
        ..AggregateStats::default()
    };

    let mut items: BTreeSet<&str> = BTreeSet::new();
    let mut accum: BTreeMap<(&str, &str), f64> = BTreeMap::new();

    for (round_idx, round) in rounds.iter().enumerate() {
        if !round.is_valid() {
            tracing::debug!(round = round_idx, uid = ?round.uid, "skipping round without groups");
            continue;
        }
        stats.rounds_counted += 1;

        let counted = round.counted_groups().count();
        stats.groups_counted += counted;
        stats.groups_excluded += round.groups.len() - counted;

        let tally = RoundTally::from_round(round);
        items.extend(tally.items());
        for (pair, distance) in tally.distances() {
            *accum.entry(pair).or_insert(0.0) += distance;
        }

        tracing::debug!(
            round = round_idx,
            uid = ?round.uid,
            groups = counted,
            pairs = tally.pair_count(),
            "tallied round"
        );
    }

    if stats.rounds_counted == 0 {
        return Err(AnalysisError::InsufficientData);
    }

    let valid_rounds = stats.rounds_counted as f64;
    let ordered: Vec<&str> = items.into_iter().collect();
    stats.item_count = ordered.len();
    stats.observed_pairs = accum.len();

    let ids: Vec<ItemId> = ordered.iter().map(|s| s.to_string()).collect();
    let matrix = DissimilarityMatrix::from_fn(ids, |i, j| {
        match accum.get(&(ordered[i], ordered[j])) {
            Some(sum) => sum / valid_rounds * NORM_MAX_DISTANCE,
            None => NORM_MAX_DISTANCE,
        }
    });

    tracing::info!(
        rounds = stats.rounds_seen,
        counted = stats.rounds_counted,
        items = stats.item_count,
        observed_pairs = stats.observed_pairs,
        "aggregated consensus matrix"
    );

    Ok(Consensus { matrix, stats })
}
