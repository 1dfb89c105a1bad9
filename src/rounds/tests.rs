use super::*;
use crate::error::AnalysisError;

#[test]
fn test_distinct_prefix_detection() {
    assert!(Group::new("Distinct", ["a"]).is_excluded());
    assert!(Group::new("  distinct: outliers ", ["a"]).is_excluded());
    assert!(Group::new("DISTINCTIVE", ["a"]).is_excluded());
    assert!(!Group::new("not distinct", ["a"]).is_excluded());
    assert!(!Group::new("lines", ["a"]).is_excluded());
}

#[test]
fn test_group_members_are_a_set() {
    let group = Group::new("A", ["2", "1", "2"]);
    assert_eq!(group.members.len(), 2);
    assert_eq!(
        group.members.iter().cloned().collect::<Vec<_>>(),
        vec!["1".to_string(), "2".to_string()]
    );
}

#[test]
fn test_valid_round_count_skips_empty_rounds() {
    let store: RoundStore = vec![
        Round::new(vec![Group::new("A", ["1", "2"])]),
        Round::new(vec![]),
        Round::new(vec![Group::new("Distinct", ["1"])]),
    ]
    .into_iter()
    .collect();

    assert_eq!(store.len(), 3);
    // a round holding only a distinct group still has a group
    assert_eq!(store.valid_round_count(), 2);
}

#[test]
fn test_parse_concatenated_objects() {
    let log = concat!(
        r#"{"groups": [], "time": 0.0, "uid": 0}"#,
        r#"{"groups": [{"name": "A", "plots": [{"id": "p1.png", "pos": [1, 2]}, {"id": "p2.png"}]}], "time": 3.5, "uid": 1}"#,
        "\n",
        r#"{"groups": [{"name": "B", "plots": [{"id": "p2.png"}]}], "uid": 2}"#,
        "\n"
    );

    let store = parse_round_log(log).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.valid_round_count(), 2);

    let second = &store.rounds()[1];
    assert_eq!(second.uid, Some(1));
    assert_eq!(second.time, Some(3.5));
    assert_eq!(second.groups[0].name, "A");
    assert!(second.groups[0].members.contains("p1.png"));
    assert!(second.groups[0].members.contains("p2.png"));
}

#[test]
fn test_parse_json_array_and_numeric_ids() {
    let log = r#"[
        {"groups": [{"name": "A", "plots": [{"id": 1}, {"id": 2}, {"id": 3}]}]},
        {"groups": [{"name": "B", "plots": [{"id": 1}, {"id": 2}]}]}
    ]"#;

    let store = parse_round_log(log).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.rounds()[0].groups[0].members.contains("3"));
    assert_eq!(store.rounds()[0].uid, None);
}

#[test]
fn test_parse_empty_input() {
    let store = parse_round_log("  \n").unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_missing_group_name_rejects_batch() {
    let log = concat!(
        r#"{"groups": [{"name": "A", "plots": [{"id": "a"}]}]}"#,
        r#"{"groups": [{"plots": [{"id": "b"}]}]}"#
    );

    match parse_round_log(log) {
        Err(AnalysisError::MalformedInputRecord { record, reason }) => {
            assert_eq!(record, 1);
            assert!(reason.contains("name"), "unexpected reason: {}", reason);
        }
        other => panic!("expected MalformedInputRecord, got {:?}", other),
    }
}

#[test]
fn test_missing_groups_field_rejected() {
    let result = parse_round_log(r#"{"uid": 4}"#);
    assert!(matches!(
        result,
        Err(AnalysisError::MalformedInputRecord { record: 0, .. })
    ));
}

#[test]
fn test_ill_typed_plots_rejected() {
    let result = parse_round_log(r#"{"groups": [{"name": "A", "plots": "p1"}]}"#);
    assert!(matches!(
        result,
        Err(AnalysisError::MalformedInputRecord { .. })
    ));
}

#[test]
fn test_empty_plot_id_rejected() {
    let result = parse_round_log(r#"{"groups": [{"name": "A", "plots": [{"id": " "}]}]}"#);
    assert!(matches!(
        result,
        Err(AnalysisError::MalformedInputRecord { .. })
    ));
}

#[test]
fn test_truncated_json_rejected() {
    let result = parse_round_log(r#"{"groups": [{"name": "A", "plots": []}]}{"groups": ["#);
    assert!(matches!(
        result,
        Err(AnalysisError::MalformedInputRecord { record: 1, .. })
    ));
}
