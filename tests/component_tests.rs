use approx::assert_abs_diff_eq;
use relief_rs::engine::output::ReliefResult;
use relief_rs::evaluation::ranking::{rank_descending, selection_mask};
use relief_rs::math::distance::{row, DistanceModel, FeatureType, WeightedMetric};
use relief_rs::math::kernel::RankKernel;
use relief_rs::math::neighborhood::{class_split, rank_neighbors, Neighbor};
use relief_rs::primitives::errors::ReliefError;

#[test]
fn test_continuous_diff_is_range_normalized() {
    // 3 samples x 2 features; column ranges are 10 and 5.
    let data = vec![0.0, 0.0, 5.0, 5.0, 10.0, 5.0];
    let model = DistanceModel::fit(&data, 3, 2, FeatureType::Continuous);

    let mut diff = [0.0; 2];
    model.per_feature_diff(row(&data, 2, 0), row(&data, 2, 1), &mut diff);
    assert_abs_diff_eq!(diff[0], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(diff[1], 1.0, epsilon = 1e-12);

    model.per_feature_diff(row(&data, 2, 0), row(&data, 2, 2), &mut diff);
    assert_abs_diff_eq!(diff[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(diff[1], 1.0, epsilon = 1e-12);
}

#[test]
fn test_degenerate_column_contributes_zero() {
    // Second column is constant.
    let data = vec![0.0, 4.0, 10.0, 4.0];
    let model = DistanceModel::fit(&data, 2, 2, FeatureType::Continuous);

    let mut diff = [0.0; 2];
    model.per_feature_diff(row(&data, 2, 0), row(&data, 2, 1), &mut diff);
    assert_abs_diff_eq!(diff[1], 0.0, epsilon = 1e-12);
}

#[test]
fn test_discrete_diff_is_equality_indicator() {
    let data = vec![1.0, 2.0, 1.0, 3.0];
    let model = DistanceModel::fit(&data, 2, 2, FeatureType::Discrete);

    let mut diff = [0.0; 2];
    model.per_feature_diff(row(&data, 2, 0), row(&data, 2, 1), &mut diff);
    assert_eq!(diff, [0.0, 1.0]);
}

#[test]
fn test_weighted_metric_biases_aggregate_distance() {
    let data = vec![0.0, 0.0, 1.0, 1.0];
    let model = DistanceModel::fit(&data, 2, 2, FeatureType::Continuous);

    let uniform = WeightedMetric::new(&model, None);
    assert_abs_diff_eq!(
        uniform.distance(row(&data, 2, 0), row(&data, 2, 1)),
        2.0,
        epsilon = 1e-12
    );

    let weights = [0.5, 0.25];
    let biased = WeightedMetric::new(&model, Some(&weights));
    assert_abs_diff_eq!(
        biased.distance(row(&data, 2, 0), row(&data, 2, 1)),
        0.75,
        epsilon = 1e-12
    );
}

#[test]
fn test_rank_kernel_decays_monotonically() {
    let kernel = RankKernel::new(10.0_f64);
    assert_abs_diff_eq!(kernel.evaluate(1), (-0.01_f64).exp(), epsilon = 1e-12);
    assert!(kernel.evaluate(1) > kernel.evaluate(5));
    assert!(kernel.evaluate(5) > kernel.evaluate(20));
    assert!(kernel.evaluate(100) < 1e-12);
}

#[test]
fn test_neighbor_ranking_orders_and_breaks_ties_by_index() {
    // 1-D samples at 0, 1, 1, 5; range 5. Neighbors of sample 0 are at
    // distances 0.2, 0.2, 1.0, with the tie resolved to the lower index.
    let data = vec![0.0, 1.0, 1.0, 5.0];
    let target = vec![0, 0, 1, 1];
    let model = DistanceModel::fit(&data, 4, 1, FeatureType::Continuous);
    let metric = WeightedMetric::new(&model, None);

    let mut ranked: Vec<Neighbor<f64>> = Vec::new();
    rank_neighbors(0, &data, &target, &metric, &mut ranked);

    let indices: Vec<usize> = ranked.iter().map(|n| n.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert!(ranked[0].hit);
    assert!(!ranked[1].hit);
    assert!(!ranked[2].hit);
}

#[test]
fn test_class_split_takes_nearest_per_side() {
    let data = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let target = vec![0, 1, 0, 1, 0];
    let model = DistanceModel::fit(&data, 5, 1, FeatureType::Continuous);
    let metric = WeightedMetric::new(&model, None);

    let mut ranked: Vec<Neighbor<f64>> = Vec::new();
    rank_neighbors(0, &data, &target, &metric, &mut ranked);

    let (mut hits, mut misses) = (Vec::new(), Vec::new());
    class_split(&ranked, 1, &mut hits, &mut misses);
    assert_eq!(hits, vec![2]);
    assert_eq!(misses, vec![1]);

    class_split(&ranked, 2, &mut hits, &mut misses);
    assert_eq!(hits, vec![2, 4]);
    assert_eq!(misses, vec![1, 3]);
}

#[test]
fn test_rank_descending_is_ordinal_with_index_ties() {
    assert_eq!(rank_descending(&[0.5, 0.9, 0.5]), vec![2, 1, 3]);
    assert_eq!(rank_descending(&[-1.0, 0.0, 1.0]), vec![3, 2, 1]);
}

#[test]
fn test_selection_mask_selects_best_ranks() {
    let ranks = vec![2, 1, 3];
    assert_eq!(selection_mask(&ranks, 2), vec![true, true, false]);
    assert_eq!(selection_mask(&ranks, 0), vec![false, false, false]);
}

#[test]
fn test_result_top_features_orders_by_rank() {
    let result = ReliefResult::from_weights(vec![0.1, 0.9, 0.5]);
    assert_eq!(result.ranks, vec![3, 1, 2]);
    assert_eq!(result.top_features(2), vec![1, 2]);
    assert_eq!(result.top_features(0), Vec::<usize>::new());
}

#[test]
fn test_error_display() {
    let err = ReliefError::InvalidFeatureType("nominal".to_string());
    assert!(err.to_string().contains("nominal"));

    let err = ReliefError::InvalidNeighborCount { k: 9, samples: 4 };
    let message = err.to_string();
    assert!(message.contains('9') && message.contains('4'));

    let err = ReliefError::MismatchedInputs {
        rows: 3,
        targets: 5,
    };
    assert!(err.to_string().contains('3'));
}

#[test]
fn test_feature_type_round_trip() {
    for tag in ["continuous", "discrete"] {
        let parsed: FeatureType = tag.parse().unwrap();
        assert_eq!(parsed.to_string(), tag);
    }
}
