use crate::rounds::Round;
use std::collections::HashMap;

/// Co-occurrence counts for a single round, reset for every round
#[derive(Debug, Default)]
pub(crate) struct RoundTally<'a> {
    /// Unordered pair `(a, b)` with `a < b` -> groups holding both
    co_occur: HashMap<(&'a str, &'a str), u32>,
    /// Item -> groups holding it
    appear: HashMap<&'a str, u32>,
}

impl<'a> RoundTally<'a> {
    pub(crate) fn from_round(round: &'a Round) -> Self {
        let mut tally = Self::default();

        for group in round.counted_groups() {
            // members are a sorted set, so i < j yields a < b
            let members: Vec<&'a str> = group.members.iter().map(String::as_str).collect();

            for (i, &a) in members.iter().enumerate() {
                *tally.appear.entry(a).or_insert(0) += 1;
                for &b in &members[i + 1..] {
                    *tally.co_occur.entry((a, b)).or_insert(0) += 1;
                }
            }
        }

        tally
    }

    /// Items that appeared in any counted group this round
    pub(crate) fn items(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.appear.keys().copied()
    }

    pub(crate) fn pair_count(&self) -> usize {
        self.co_occur.len()
    }

    /// Round-local co-occurrence ratio distance for every pair seen together
    ///
    /// `1 - together / min(appear(a), appear(b))`: 0 when the pair is always
    /// grouped together relative to the less frequently grouped item.
    pub(crate) fn distances(&self) -> impl Iterator<Item = ((&'a str, &'a str), f64)> + '_ {
        self.co_occur.iter().map(move |(&(a, b), &together)| {
            let min_appear = self.appear[a].min(self.appear[b]);
            ((a, b), 1.0 - f64::from(together) / f64::from(min_appear))
        })
    }
}
