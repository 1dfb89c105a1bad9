use super::*;
use crate::error::AnalysisError;
use crate::rounds::{Group, Round, RoundStore};

fn round(groups: &[(&str, &[&str])]) -> Round {
    Round::new(
        groups
            .iter()
            .map(|(name, members)| Group::new(*name, members.iter().copied()))
            .collect(),
    )
}

fn store(rounds: Vec<Round>) -> RoundStore {
    rounds.into_iter().collect()
}

fn assert_matrix_invariants(consensus: &Consensus) {
    let m = &consensus.matrix;
    for i in 0..m.len() {
        assert_eq!(m.get(i, i), 0.0);
        for j in 0..m.len() {
            assert_eq!(m.get(i, j), m.get(j, i));
            assert!((0.0..=100.0).contains(&m.get(i, j)));
        }
    }
}

#[test]
fn test_two_round_scenario() {
    let rounds = store(vec![
        round(&[("A", &["1", "2", "3"])]),
        round(&[("B", &["1", "2"]), ("Distinct", &["2", "3"])]),
    ]);

    let consensus = aggregate(&rounds).unwrap();
    assert_eq!(consensus.items(), &["1", "2", "3"]);

    let m = &consensus.matrix;
    assert_eq!(m.distance("1", "2"), Some(0.0));
    assert_eq!(m.distance("1", "3"), Some(0.0));
    assert_eq!(m.distance("2", "3"), Some(0.0));
    assert_matrix_invariants(&consensus);

    assert_eq!(consensus.stats.rounds_counted, 2);
    assert_eq!(consensus.stats.groups_counted, 2);
    assert_eq!(consensus.stats.groups_excluded, 1);
    assert_eq!(consensus.stats.observed_pairs, 3);
}

#[test]
fn test_partial_co_occurrence_normalization() {
    // Round 1: a, b together; c alone. Round 2: a with c; b alone.
    let rounds = store(vec![
        round(&[("x", &["a", "b"]), ("y", &["c"])]),
        round(&[("x", &["a", "c"]), ("y", &["b"])]),
    ]);

    let m = aggregate(&rounds).unwrap().matrix;
    // each observed pair has round distance 0 once, summed over 2 rounds
    assert_eq!(m.distance("a", "b"), Some(0.0));
    assert_eq!(m.distance("a", "c"), Some(0.0));
    // b and c never share a group
    assert_eq!(m.distance("b", "c"), Some(100.0));
}

#[test]
fn test_overlapping_groups_use_min_appearance() {
    // a appears in two groups of the same round, b only in one with a
    let rounds = store(vec![round(&[("g1", &["a", "b"]), ("g2", &["a", "c"])])]);
    let m = aggregate(&rounds).unwrap().matrix;

    // together 1 time, min(appear(a)=2, appear(b)=1) = 1 -> 0
    assert_eq!(m.distance("a", "b"), Some(0.0));
    assert_eq!(m.distance("b", "c"), Some(100.0));

    // a and b together in one of two groups each -> 1 - 1/2
    let rounds = store(vec![round(&[
        ("g1", &["a", "b"]),
        ("g2", &["a", "c"]),
        ("g3", &["b", "d"]),
    ])]);
    let m = aggregate(&rounds).unwrap().matrix;
    assert_eq!(m.distance("a", "b"), Some(50.0));
}

#[test]
fn test_empty_round_does_not_change_matrix() {
    let base = vec![
        round(&[("A", &["1", "2"]), ("B", &["3"])]),
        round(&[("A", &["1", "2"]), ("B", &["3"])]),
    ];
    let mut with_empty = base.clone();
    with_empty.insert(1, Round::new(vec![]));

    let expected = aggregate(&store(base)).unwrap();
    let actual = aggregate(&store(with_empty)).unwrap();

    assert_eq!(expected.matrix, actual.matrix);
    assert_eq!(actual.stats.rounds_seen, 3);
    assert_eq!(actual.stats.rounds_counted, 2);
}

#[test]
fn test_distinct_only_items_are_absent() {
    let rounds = store(vec![round(&[
        ("lines", &["a", "b"]),
        ("Distinct: outliers", &["a", "z"]),
    ])]);

    let consensus = aggregate(&rounds).unwrap();
    assert_eq!(consensus.items(), &["a", "b"]);
    assert!(!consensus.matrix.contains("z"));
    assert_eq!(consensus.matrix.distance("a", "b"), Some(0.0));
}

#[test]
fn test_distinct_group_adds_no_edges() {
    let rounds = store(vec![round(&[
        ("left", &["a"]),
        ("right", &["b"]),
        ("  DISTINCT ones", &["a", "b"]),
    ])]);

    let m = aggregate(&rounds).unwrap().matrix;
    assert_eq!(m.distance("a", "b"), Some(100.0));
}

#[test]
fn test_round_with_only_distinct_group_still_counts() {
    let rounds = store(vec![
        round(&[("A", &["a", "b"])]),
        round(&[("Distinct", &["a", "b"])]),
    ]);

    let consensus = aggregate(&rounds).unwrap();
    assert_eq!(consensus.stats.rounds_counted, 2);
    assert_eq!(consensus.matrix.distance("a", "b"), Some(0.0));
}

#[test]
fn test_never_co_occurring_pairs_are_maximal() {
    let rounds = store(vec![
        round(&[("A", &["a", "b"]), ("B", &["c", "d"])]),
        round(&[("A", &["a", "b"]), ("B", &["c", "d"])]),
        round(&[("A", &["a"]), ("B", &["b", "c", "d"])]),
    ]);

    let m = aggregate(&rounds).unwrap().matrix;
    assert_eq!(m.distance("a", "c"), Some(100.0));
    assert_eq!(m.distance("a", "d"), Some(100.0));
    assert_eq!(m.distance("c", "d"), Some(0.0));
}

#[test]
fn test_always_together_pairs_are_zero() {
    let rounds = store(vec![
        round(&[("A", &["a", "b", "c"])]),
        round(&[("A", &["a", "b"]), ("B", &["c"])]),
        round(&[("A", &["c"]), ("B", &["a", "b"])]),
    ]);

    let consensus = aggregate(&rounds).unwrap();
    assert_eq!(consensus.matrix.distance("a", "b"), Some(0.0));
    assert_matrix_invariants(&consensus);
}

#[test]
fn test_singleton_items_enter_item_set() {
    let rounds = store(vec![round(&[("A", &["a", "b"]), ("B", &["solo"])])]);

    let consensus = aggregate(&rounds).unwrap();
    assert_eq!(consensus.items(), &["a", "b", "solo"]);
    assert_eq!(consensus.matrix.distance("a", "solo"), Some(100.0));
}

#[test]
fn test_no_valid_round_is_insufficient_data() {
    let rounds = store(vec![Round::new(vec![]), Round::new(vec![])]);
    assert_eq!(aggregate(&rounds).unwrap_err(), AnalysisError::InsufficientData);
    assert_eq!(
        aggregate(&RoundStore::new()).unwrap_err(),
        AnalysisError::InsufficientData
    );
}

#[test]
fn test_aggregation_is_deterministic_and_order_insensitive() {
    let rounds = vec![
        round(&[("A", &["p1", "p2", "p3"]), ("B", &["p4", "p5"])]),
        round(&[("A", &["p1", "p4"]), ("B", &["p2", "p3", "p5"])]),
        round(&[("A", &["p5", "p1"]), ("B", &["p2"]), ("C", &["p3", "p4"])]),
    ];
    let mut reversed = rounds.clone();
    reversed.reverse();

    let first = aggregate(&store(rounds.clone())).unwrap();
    let second = aggregate(&store(rounds)).unwrap();
    assert_eq!(first.matrix.fingerprint(), second.matrix.fingerprint());

    let other_order = aggregate(&store(reversed)).unwrap();
    for (i, j, d) in first.matrix.upper_triangle() {
        assert!((other_order.matrix.get(i, j) - d).abs() < 1e-9);
    }
    assert_matrix_invariants(&first);
}
