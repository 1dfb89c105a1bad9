use std::collections::BTreeSet;

/// Identifier of a clusterable item (a plot image in the collection study)
pub type ItemId = String;

/// Group names starting with this prefix assert their members are *not* alike
pub const EXCLUDED_GROUP_PREFIX: &str = "distinct";

/// A named set of items one rater put together
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub members: BTreeSet<ItemId>,
}

impl Group {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this group is a negative assertion ("Distinct ...")
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn is_excluded(&self) -> bool {
        self.name
            .trim()
            .to_lowercase()
            .starts_with(EXCLUDED_GROUP_PREFIX)
    }
}

/// One complete grouping exercise by a single rater
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Round {
    /// Rater id from the collection log, if recorded
    pub uid: Option<u64>,
    /// Seconds since collection server start, if recorded
    pub time: Option<f64>,
    pub groups: Vec<Group>,
}

impl Round {
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            uid: None,
            time: None,
            groups,
        }
    }

    /// Rounds with no groups at all are invalid and never counted
    pub fn is_valid(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Groups that take part in co-occurrence counting
    pub fn counted_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.is_excluded())
    }
}

/// Ordered sequence of rounds, as read from a collection log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundStore {
    rounds: Vec<Round>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: Round) {
        self.rounds.push(round);
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Number of rounds that will count toward normalization
    pub fn valid_round_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.is_valid()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter()
    }
}

impl FromIterator<Round> for RoundStore {
    fn from_iter<T: IntoIterator<Item = Round>>(iter: T) -> Self {
        Self {
            rounds: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Round>> for RoundStore {
    fn from(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }
}
