use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use relief_rs::prelude::*;

/// Row-major synthetic dataset whose class is `col 0 > col 1`; every other
/// column is uninformative noise.
fn separable(samples: usize, features: usize, seed: u64, discrete: bool) -> (Vec<f64>, Vec<i64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(samples * features);
    for _ in 0..samples * features {
        if discrete {
            data.push(rng.gen_range(0..3) as f64);
        } else {
            data.push(rng.gen::<f64>());
        }
    }
    let target = (0..samples)
        .map(|i| (data[i * features] > data[i * features + 1]) as i64)
        .collect();
    (data, target)
}

/// The two informative columns must each outweigh every noise column.
fn assert_top_two(weights: &[f64]) {
    let informative = weights[0].min(weights[1]);
    for (column, &weight) in weights.iter().enumerate().skip(2) {
        assert!(
            informative >= weight,
            "noise column {} (weight {}) outranks an informative column (weight {})",
            column,
            weight,
            informative
        );
    }
}

#[test]
fn test_relieff_ranking_continuous_all_policies() {
    let (data, target) = separable(400, 6, 42, false);

    for policy in [KNearest, Diff, ExpRank] {
        let result = Relief::new()
            .feature_type(Continuous)
            .update_policy(policy)
            .neighbors(10)
            .algorithm(Algorithm::ReliefF)
            .build()
            .unwrap()
            .fit(&data, &target)
            .unwrap();

        assert_eq!(result.weights.len(), 6);
        assert_top_two(&result.weights);
    }
}

#[test]
fn test_relieff_ranking_discrete_all_policies() {
    let (data, target) = separable(500, 6, 43, true);

    for policy in [KNearest, Diff, ExpRank] {
        let result = Relief::new()
            .feature_type(Discrete)
            .update_policy(policy)
            .neighbors(10)
            .algorithm(Algorithm::ReliefF)
            .build()
            .unwrap()
            .fit(&data, &target)
            .unwrap();

        assert_top_two(&result.weights);
    }
}

#[test]
fn test_exp_rank_scenario_1000_by_10() {
    let (data, target) = separable(1000, 10, 44, false);

    let weights = relieff(&data, &target, ExpRank, Continuous, None).unwrap();

    assert_eq!(weights.len(), 10);
    for (column, &weight) in weights.iter().enumerate().skip(2) {
        assert!(
            weights[0] > weight && weights[1] > weight,
            "noise column {} (weight {}) outranks an informative column",
            column,
            weight
        );
    }
}

#[test]
fn test_iterative_ranking_continuous() {
    let (data, target) = separable(300, 6, 45, false);

    let result = Relief::new()
        .feature_type(Continuous)
        .algorithm(Algorithm::IterativeRelief)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();

    assert_top_two(&result.weights);

    // The state is a valid metric: non-negative, unit sum.
    let total: f64 = result.weights.iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
    assert!(result.weights.iter().all(|&w| w >= 0.0));
    assert!(result.iterations_run.unwrap() <= 20);
}

#[test]
fn test_iterative_ranking_discrete() {
    let (data, target) = separable(500, 6, 46, true);

    let result = Relief::new()
        .feature_type(Discrete)
        .iterations(10)
        .algorithm(Algorithm::IterativeRelief)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();

    assert_top_two(&result.weights);
}

#[test]
fn test_iterative_history_approaches_final() {
    let (data, target) = separable(300, 6, 47, false);

    let result = Relief::new()
        .feature_type(Continuous)
        .iterations(10)
        .return_history(true)
        .algorithm(Algorithm::IterativeRelief)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();

    let history = result.history.as_ref().unwrap();
    assert_eq!(history.len(), result.iterations_run.unwrap());
    assert_eq!(history.last().unwrap(), &result.weights);

    if history.len() >= 2 {
        let distance = |state: &[f64]| -> f64 {
            state
                .iter()
                .zip(result.weights.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt()
        };
        let first = distance(&history[0]);
        let penultimate = distance(&history[history.len() - 2]);
        assert!(
            penultimate <= first + 1e-9,
            "refinement moved away from the terminal state ({} -> {})",
            first,
            penultimate
        );
    }
}

#[test]
fn test_surf_ranking() {
    let (data, target) = separable(400, 6, 48, false);

    let result = Relief::new()
        .feature_type(Continuous)
        .algorithm(Algorithm::Surf)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();
    assert_eq!(result.weights.len(), 6);
    assert_top_two(&result.weights);
}

#[test]
fn test_multisurf_ranking() {
    let (data, target) = separable(400, 6, 48, false);

    let result = Relief::new()
        .feature_type(Continuous)
        .algorithm(Algorithm::MultiSurf)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();
    assert_eq!(result.weights.len(), 6);
    assert_top_two(&result.weights);
}

#[test]
fn test_surfstar_weights_are_bounded_and_deterministic() {
    // The far-zone inversion trades main-effect power for interaction
    // sensitivity, so only the structural contract is asserted here.
    let (data, target) = separable(400, 6, 48, false);

    let run = || {
        Relief::new()
            .feature_type(Continuous)
            .algorithm(Algorithm::SurfStar)
            .build()
            .unwrap()
            .fit(&data, &target)
            .unwrap()
            .weights
    };

    let weights = run();
    assert_eq!(weights.len(), 6);
    assert!(weights.iter().all(|w| w.abs() <= 1.0 + 1e-9));
    assert_eq!(weights, run());
}

#[test]
fn test_invalid_feature_type_tag() {
    let err = "something_else".parse::<FeatureType>().unwrap_err();
    assert_eq!(
        err,
        ReliefError::InvalidFeatureType("something_else".to_string())
    );

    assert_eq!("continuous".parse::<FeatureType>().unwrap(), Continuous);
    assert_eq!("discrete".parse::<FeatureType>().unwrap(), Discrete);
}

#[test]
fn test_invalid_mode_tag() {
    let err = "bogus".parse::<UpdatePolicy>().unwrap_err();
    assert_eq!(err, ReliefError::InvalidMode("bogus".to_string()));

    assert_eq!("k_nearest".parse::<UpdatePolicy>().unwrap(), KNearest);
    assert_eq!("diff".parse::<UpdatePolicy>().unwrap(), Diff);
    assert_eq!("exp_rank".parse::<UpdatePolicy>().unwrap(), ExpRank);
}

#[test]
fn test_unset_feature_type_fails_before_any_work() {
    let err = Relief::new::<f64>()
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidFeatureType(_)));

    let err = Relief::new::<f64>()
        .algorithm(Algorithm::IterativeRelief)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidFeatureType(_)));

    let err = Relief::new::<f64>()
        .algorithm(Algorithm::MultiSurf)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidFeatureType(_)));
}

#[test]
fn test_neighbor_count_errors() {
    // KNearest without a neighbor count fails at build.
    let err = Relief::new::<f64>()
        .feature_type(Continuous)
        .update_policy(KNearest)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidNeighborCount { .. }));

    // Zero neighbors fails at build.
    let err = Relief::new::<f64>()
        .feature_type(Continuous)
        .update_policy(KNearest)
        .neighbors(0)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidNeighborCount { .. }));

    // A neighbor count at or above the sample count fails at fit.
    let data = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let target = vec![0, 1, 0, 1];
    let err = Relief::new()
        .feature_type(Continuous)
        .update_policy(KNearest)
        .neighbors(10)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap_err();
    assert_eq!(
        err,
        ReliefError::InvalidNeighborCount {
            k: 10,
            samples: 4
        }
    );

    // The one-shot form enforces the same contract.
    let err = relieff(&data, &target, KNearest, Continuous, None).unwrap_err();
    assert!(matches!(err, ReliefError::InvalidNeighborCount { .. }));
}

#[test]
fn test_mismatched_and_malformed_inputs() {
    // Flat buffer that does not divide into the target rows.
    let data = vec![1.0; 7];
    let target = vec![0, 1, 0];
    let err = relieff(&data, &target, Diff, Continuous, None).unwrap_err();
    assert!(matches!(err, ReliefError::InvalidInput(_)));

    // Fewer than 2 samples.
    let err = relieff(&[1.0, 2.0], &[0], Diff, Continuous, None).unwrap_err();
    assert!(matches!(err, ReliefError::InvalidInput(_)));

    // Non-finite values are rejected up front.
    let data = vec![1.0, f64::NAN, 2.0, 3.0];
    let target = vec![0, 1];
    let err = relieff(&data, &target, Diff, Continuous, None).unwrap_err();
    assert!(matches!(err, ReliefError::InvalidInput(_)));
}

#[cfg(feature = "cpu")]
#[test]
fn test_ndarray_integration() {
    use ndarray::{Array1, Array2};

    let data = Array2::from_shape_vec((4, 2), vec![0.9, 0.1, 0.8, 0.3, 0.2, 0.7, 0.1, 0.6])
        .unwrap();
    let target = Array1::from_vec(vec![1_i64, 1, 0, 0]);

    let result = Relief::new()
        .feature_type(Continuous)
        .update_policy(Diff)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();
    assert_eq!(result.weights.len(), 2);

    // A shape-carrying input is authoritative: row mismatch is detected.
    let short = Array2::from_shape_vec((3, 2), vec![0.9, 0.1, 0.8, 0.3, 0.2, 0.7]).unwrap();
    let err = Relief::new()
        .feature_type(Continuous)
        .update_policy(Diff)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap()
        .fit(&short, &target)
        .unwrap_err();
    assert_eq!(err, ReliefError::MismatchedInputs { rows: 3, targets: 4 });
}

#[test]
fn test_determinism() {
    let (data, target) = separable(200, 6, 49, false);

    let run = || {
        Relief::new()
            .feature_type(Continuous)
            .update_policy(ExpRank)
            .algorithm(Algorithm::ReliefF)
            .build()
            .unwrap()
            .fit(&data, &target)
            .unwrap()
            .weights
    };

    assert_eq!(run(), run());

    let iterate = || iterative_relief(&data, &target, Continuous, Some(5)).unwrap();
    assert_eq!(iterate(), iterate());
}

#[test]
fn test_identical_rows_collapse_to_zero() {
    let data: Vec<f64> = std::iter::repeat([1.0, 2.0, 3.0])
        .take(6)
        .flatten()
        .collect();
    let target = vec![0, 1, 0, 1, 0, 1];

    for policy in [KNearest, Diff] {
        let weights = relieff(&data, &target, policy, Continuous, Some(2)).unwrap();
        for &w in &weights {
            assert_abs_diff_eq!(w, 0.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_weights_bounded() {
    let (data, target) = separable(300, 6, 50, false);

    for policy in [KNearest, Diff, ExpRank] {
        let weights = relieff(&data, &target, policy, Continuous, Some(10)).unwrap();
        for &w in &weights {
            assert!(w.abs() <= 1.0 + 1e-9, "weight {} out of bounds", w);
        }
    }
}

#[test]
fn test_ranks_and_selection() {
    let (data, target) = separable(400, 6, 51, false);

    let result = Relief::new()
        .feature_type(Continuous)
        .update_policy(ExpRank)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap()
        .fit(&data, &target)
        .unwrap();

    // The informative columns occupy the two best ranks.
    let mut top = result.top_features(2);
    top.sort_unstable();
    assert_eq!(top, vec![0, 1]);

    let mask = selection_mask(&result.ranks, 2);
    assert!(mask[0] && mask[1]);
    assert_eq!(mask.iter().filter(|&&m| m).count(), 2);
}

#[test]
fn test_invalid_knobs_fail_at_build() {
    let err = Relief::new()
        .feature_type(Continuous)
        .decay(0.0_f64)
        .algorithm(Algorithm::ReliefF)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidInput(_)));

    let err = Relief::new::<f64>()
        .feature_type(Continuous)
        .iterations(0)
        .algorithm(Algorithm::IterativeRelief)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidInput(_)));
}

#[test]
fn test_one_shot_functions() {
    let (data, target) = separable(300, 6, 52, false);

    let weights = relieff(&data, &target, KNearest, Continuous, Some(10)).unwrap();
    assert_eq!(weights.len(), 6);
    assert_top_two(&weights);

    let weights = iterative_relief(&data, &target, Continuous, Some(10)).unwrap();
    assert_eq!(weights.len(), 6);
    assert_top_two(&weights);
}
