use super::*;
use crate::error::AnalysisError;
use crate::matrix::DissimilarityMatrix;

fn matrix(ids: &[&str], rows: Vec<Vec<f64>>) -> DissimilarityMatrix {
    DissimilarityMatrix::from_rows(ids.iter().map(|s| s.to_string()).collect(), rows).unwrap()
}

fn tight() -> MdsConfig {
    MdsConfig::default().with_eps(1e-12).with_max_iter(2000)
}

#[test]
fn test_config_default() {
    let config = MdsConfig::default();
    assert_eq!(config.scale, 1.0);
    assert_eq!(config.seed, 0);
    assert_eq!(config.n_init, 4);
    assert_eq!(config.max_iter, 300);
    assert_eq!(config.eps, 1e-3);
}

#[test]
fn test_config_custom() {
    let config = MdsConfig::new(2.0, 7).with_n_init(1);
    assert_eq!(config.scale, 2.0);
    assert_eq!(config.seed, 7);
    assert_eq!(config.n_init, 1);
}

#[test]
fn test_single_item_is_degenerate() {
    let m = matrix(&["a"], vec![vec![0.0]]);
    assert!(matches!(
        embed(&m, &MdsConfig::default()),
        Err(AnalysisError::DegenerateInput(_))
    ));
}

#[test]
fn test_non_positive_scale_rejected() {
    let m = matrix(&["a", "b"], vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    let config = MdsConfig::default().with_scale(0.0);
    assert!(embed(&m, &config).is_err());
}

#[test]
fn test_two_points_recover_distance() {
    let m = matrix(&["a", "b"], vec![vec![0.0, 40.0], vec![40.0, 0.0]]);

    let embedding = embed(&m, &MdsConfig::default()).unwrap();
    assert_eq!(embedding.len(), 2);
    assert_eq!(embedding.points[0].id, "a");
    let d = embedding.layout_distance("a", "b").unwrap();
    assert!((d - 40.0).abs() < 1e-6, "got {}", d);
}

#[test]
fn test_scale_multiplies_targets() {
    let m = matrix(&["a", "b"], vec![vec![0.0, 40.0], vec![40.0, 0.0]]);

    let embedding = embed(&m, &MdsConfig::default().with_scale(2.0)).unwrap();
    let d = embedding.layout_distance("a", "b").unwrap();
    assert!((d - 80.0).abs() < 1e-6, "got {}", d);
}

#[test]
fn test_right_triangle_is_recovered() {
    let m = matrix(
        &["a", "b", "c"],
        vec![
            vec![0.0, 3.0, 4.0],
            vec![3.0, 0.0, 5.0],
            vec![4.0, 5.0, 0.0],
        ],
    );

    let embedding = embed(&m, &tight()).unwrap();
    for (a, b, expected) in [("a", "b", 3.0), ("a", "c", 4.0), ("b", "c", 5.0)] {
        let d = embedding.layout_distance(a, b).unwrap();
        assert!((d - expected).abs() < 1e-3, "{}-{}: {} vs {}", a, b, d, expected);
    }
    assert!(embedding.stress < 1e-4);
}

#[test]
fn test_same_seed_is_deterministic() {
    let m = matrix(
        &["a", "b", "c", "d"],
        vec![
            vec![0.0, 10.0, 100.0, 80.0],
            vec![10.0, 0.0, 90.0, 100.0],
            vec![100.0, 90.0, 0.0, 20.0],
            vec![80.0, 100.0, 20.0, 0.0],
        ],
    );

    let config = MdsConfig::default().with_seed(42);
    let first = embed(&m, &config).unwrap();
    let second = embed(&m, &config).unwrap();
    assert_eq!(first, second);

    // Close items stay closer than far ones
    let near = first.layout_distance("a", "b").unwrap();
    let far = first.layout_distance("a", "c").unwrap();
    assert!(near < far);
}

#[test]
fn test_identical_items_collapse() {
    let m = matrix(&["a", "b", "c"], vec![vec![0.0; 3]; 3]);
    let embedding = embed(&m, &MdsConfig::default()).unwrap();
    assert!(embedding.stress.is_finite());
    assert!(embedding.layout_distance("a", "c").unwrap() < 1e-6);
}
