use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;
use crate::rounds::ItemId;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;


/// How items are presented to a rater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStrategy {
    /// Uniform shuffle from a caller-owned RNG
    Random,
    /// Keep the submitted order
    None,
    /// Sort by item id
    Lexicographic,
    /// Greedy chain: start at the first item, always step to the closest
    /// remaining one according to a dissimilarity matrix
    NearestNeighbor,
}

impl OrderStrategy {
    pub const ALL: [OrderStrategy; 4] = [
        OrderStrategy::Random,
        OrderStrategy::None,
        OrderStrategy::Lexicographic,
        OrderStrategy::NearestNeighbor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrderStrategy::Random => "random",
            OrderStrategy::None => "none",
            OrderStrategy::Lexicographic => "name",
            OrderStrategy::NearestNeighbor => "nearest",
        }
    }

    /// Permutation of `0..items.len()` giving the presentation order
    ///
    /// `NearestNeighbor` needs `matrix`; pairs missing from it count as
    /// infinitely far apart.
    pub fn reorder<R: Rng + ?Sized>(
        &self,
        items: &[ItemId],
        rng: &mut R,
        matrix: Option<&DissimilarityMatrix>,
    ) -> Result<Vec<usize>> {
        let mut order: Vec<usize> = (0..items.len()).collect();

        match self {
            OrderStrategy::Random => order.shuffle(rng),
            OrderStrategy::None => {}
            OrderStrategy::Lexicographic => order.sort_by(|&a, &b| items[a].cmp(&items[b])),
            OrderStrategy::NearestNeighbor => {
                let matrix = matrix.ok_or_else(|| {
                    AnalysisError::DegenerateInput(
                        "nearest ordering needs a dissimilarity matrix".to_string(),
                    )
                })?;
                order = nearest_chain(items, matrix);
            }
        }

        Ok(order)
    }
}

impl FromStr for OrderStrategy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(OrderStrategy::Random),
            "none" => Ok(OrderStrategy::None),
            "name" | "lexicographic" => Ok(OrderStrategy::Lexicographic),
            "nearest" | "nearest-neighbor" => Ok(OrderStrategy::NearestNeighbor),
            _ => Err(AnalysisError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn nearest_chain(items: &[ItemId], matrix: &DissimilarityMatrix) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..items.len()).collect();
    if remaining.is_empty() {
        return remaining;
    }

    let mut chain = vec![remaining.remove(0)];
    while !remaining.is_empty() {
        let current = &items[chain[chain.len() - 1]];
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let d = matrix
                .distance(current, &items[candidate])
                .unwrap_or(f64::INFINITY);
            // strict: the earliest candidate wins ties
            if d < best_dist {
                best_dist = d;
                best = pos;
            }
        }
        chain.push(remaining.remove(best));
    }
    chain
}

/// Seed for the shuffle behind question `cur` of rater `uid`
pub fn question_seed(uid: u64, cur: u64) -> u64 {
    uid.wrapping_mul(31 * 31)
        .wrapping_add(cur.wrapping_mul(31))
        .wrapping_add(7717)
}

/// Reproducible sample of `count` items for one question of a rater
pub fn question_items(items: &[ItemId], uid: u64, cur: u64, count: usize) -> Vec<ItemId> {
    let mut rng = ChaCha8Rng::seed_from_u64(question_seed(uid, cur));
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rng);
    shuffled.truncate(count);
    shuffled
}
