// Unit tests for prior resolution and the raw statistic.
//
// Tests isolated pure functions: Prior validation and resolution edge cases,
// and log_odds_with_prior numerical properties.

use fightin_words::counts::CountMatrix;
use fightin_words::stats::log_odds_with_prior;
use fightin_words::Prior;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("term{i}")).collect()
}

// ============================================================
// Prior: validation and resolution
// ============================================================

#[test]
fn uniform_prior_never_fails_on_size() {
    let prior = Prior::uniform(0.01).unwrap();
    for v in [1, 2, 100, 15_000] {
        let resolved = prior.resolve(v).unwrap();
        assert_eq!(resolved.len(), v);
        assert!(resolved.iter().all(|&p| p == 0.01));
    }
}

#[test]
fn explicit_prior_size_mismatch_always_fails() {
    let prior = Prior::explicit(vec![0.1; 5]).unwrap();
    for v in [0, 1, 4, 6, 50] {
        let err = prior.resolve(v).unwrap_err();
        assert!(err.is_configuration(), "size {v} should fail");
    }
    assert_eq!(prior.resolve(5).unwrap(), vec![0.1; 5]);
}

#[test]
fn infinite_prior_rejected() {
    assert!(Prior::uniform(f64::INFINITY).is_err());
    assert!(Prior::explicit(vec![1.0, f64::INFINITY]).is_err());
}

#[test]
fn unvalidated_prior_still_checked_on_resolve() {
    // Built directly, skipping the validating constructor
    let prior = Prior::Uniform(-0.5);
    assert!(prior.resolve(3).is_err());
}

#[test]
fn display_forms() {
    assert_eq!(Prior::Uniform(0.01).to_string(), "0.01");
    assert_eq!(Prior::Explicit(vec![1.0, 2.0]).to_string(), "explicit[2]");
}

// ============================================================
// log_odds_with_prior: numerical properties
// ============================================================

#[test]
fn rare_term_scores_below_frequent_term_with_same_ratio() {
    // Term 0: 1 vs 0.  Term 1: 50 vs 0.  Same direction, very different evidence.
    let counts = CountMatrix::from_rows(vec![1.0, 50.0, 100.0], vec![0.0, 0.0, 100.0]).unwrap();
    let stats = log_odds_with_prior(&counts, &[0.01; 3], &names(3)).unwrap();
    assert!(stats[0].z_score > 0.0);
    assert!(stats[1].z_score > stats[0].z_score);
}

#[test]
fn variance_is_sum_of_inverse_smoothed_counts() {
    let counts = CountMatrix::from_rows(vec![4.0, 1.0], vec![1.0, 4.0]).unwrap();
    let stats = log_odds_with_prior(&counts, &[1.0, 1.0], &names(2)).unwrap();
    assert!((stats[0].variance - (1.0 / 5.0 + 1.0 / 2.0)).abs() < 1e-12);
    assert!((stats[0].z_score - stats[0].delta / stats[0].variance.sqrt()).abs() < 1e-12);
}

#[test]
fn swapped_counts_negate_delta() {
    let counts = CountMatrix::from_rows(vec![3.0, 1.0, 7.0], vec![2.0, 5.0, 1.0]).unwrap();
    let priors = [0.5, 0.25, 0.125];
    let forward = log_odds_with_prior(&counts, &priors, &names(3)).unwrap();
    let backward = log_odds_with_prior(&counts.swapped(), &priors, &names(3)).unwrap();
    for (f, b) in forward.iter().zip(&backward) {
        assert_eq!(f.delta, -b.delta);
        assert_eq!(f.variance, b.variance);
        assert_eq!(f.z_score, -b.z_score);
    }
}

#[test]
fn empty_vocabulary_yields_empty_result() {
    let counts = CountMatrix::from_rows(vec![], vec![]).unwrap();
    let stats = log_odds_with_prior(&counts, &[], &[]).unwrap();
    assert!(stats.is_empty());
}
