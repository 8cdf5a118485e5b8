// Log-odds-ratio with an informative Dirichlet prior (Monroe et al. 2008).
//
// For each term i, with y = counts, α = priors, n = corpus totals and
// a0 = Σα:
//
//   δ_i  = ln((yA_i + α_i) / (nA + a0 - yA_i - α_i))
//        - ln((yB_i + α_i) / (nB + a0 - yB_i - α_i))
//   σ²_i = 1/(yA_i + α_i) + 1/(yB_i + α_i)
//   z_i  = δ_i / σ_i
//
// Positive z favors corpus A. Every term is computed independently of every
// other, so the loop has no cross-iteration state.

use serde::Serialize;

use crate::counts::CountMatrix;
use crate::error::{FightinError, Result};

/// Per-term output of the statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermStatistic {
    /// Unstandardized prior-smoothed log-odds-ratio
    pub delta: f64,
    /// Estimated variance of `delta`
    pub variance: f64,
    /// `delta / sqrt(variance)`
    pub z_score: f64,
}

/// Compute the statistic for every term.
///
/// `terms` is used only to name the offending term in a numeric error and
/// must have the same length as `priors` and both count rows.
pub fn log_odds_with_prior(
    counts: &CountMatrix,
    priors: &[f64],
    terms: &[String],
) -> Result<Vec<TermStatistic>> {
    let v = counts.n_terms();
    if priors.len() != v || counts.counts_b.len() != v || terms.len() != v {
        return Err(FightinError::config(format!(
            "prior size mismatch: {} priors, {} terms, {}/{} counts",
            priors.len(),
            terms.len(),
            counts.counts_a.len(),
            counts.counts_b.len()
        )));
    }

    let a0: f64 = priors.iter().sum();
    let n1 = counts.total_a();
    let n2 = counts.total_b();

    (0..v)
        .map(|i| {
            let alpha = priors[i];
            let smoothed_a = counts.counts_a[i] + alpha;
            let smoothed_b = counts.counts_b[i] + alpha;
            let rest_a = n1 + a0 - smoothed_a;
            let rest_b = n2 + a0 - smoothed_b;

            for (name, value) in [
                ("smoothed count in A", smoothed_a),
                ("smoothed count in B", smoothed_b),
                ("remaining mass in A", rest_a),
                ("remaining mass in B", rest_b),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(numeric(&terms[i], format!("{name} is {value}")));
                }
            }

            let delta = (smoothed_a / rest_a).ln() - (smoothed_b / rest_b).ln();
            let variance = 1.0 / smoothed_a + 1.0 / smoothed_b;
            let z_score = delta / variance.sqrt();

            if !z_score.is_finite() {
                return Err(numeric(&terms[i], format!("z-score is {z_score}")));
            }

            Ok(TermStatistic {
                delta,
                variance,
                z_score,
            })
        })
        .collect()
}

fn numeric(term: &str, detail: String) -> FightinError {
    FightinError::Numeric {
        term: term.to_string(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("t{i}")).collect()
    }

    #[test]
    fn test_hand_computed_values() {
        // A: [2, 0], B: [0, 2], prior 1.0 each -> a0 = 2, n1 = n2 = 2
        let counts = CountMatrix::from_rows(vec![2.0, 0.0], vec![0.0, 2.0]).unwrap();
        let stats = log_odds_with_prior(&counts, &[1.0, 1.0], &terms(2)).unwrap();

        // term 0: ln(3/1) - ln(1/3) = 2 ln 3; var = 1/3 + 1 = 4/3
        let expected_delta = 2.0 * 3.0_f64.ln();
        let expected_var = 4.0 / 3.0;
        assert!((stats[0].delta - expected_delta).abs() < 1e-12);
        assert!((stats[0].variance - expected_var).abs() < 1e-12);
        assert!((stats[0].z_score - expected_delta / expected_var.sqrt()).abs() < 1e-12);
        assert!((stats[1].z_score + stats[0].z_score).abs() < 1e-12);
    }

    #[test]
    fn test_identical_counts_give_zero() {
        let counts = CountMatrix::from_rows(vec![3.0, 1.0], vec![3.0, 1.0]).unwrap();
        let stats = log_odds_with_prior(&counts, &[0.01, 0.01], &terms(2)).unwrap();
        assert!(stats.iter().all(|s| s.z_score.abs() < 1e-12));
    }

    #[test]
    fn test_term_absent_from_both_corpora_is_finite() {
        let counts = CountMatrix::from_rows(vec![1.0, 0.0], vec![2.0, 0.0]).unwrap();
        let stats = log_odds_with_prior(&counts, &[0.01, 0.01], &terms(2)).unwrap();
        assert!(stats[1].z_score.is_finite());
    }

    #[test]
    fn test_single_term_vocabulary_is_numeric_error() {
        // n + a0 - count - prior == 0 for the only term
        let counts = CountMatrix::from_rows(vec![3.0], vec![1.0]).unwrap();
        let err = log_odds_with_prior(&counts, &[0.5], &terms(1)).unwrap_err();
        assert!(err.is_numeric());
        assert!(err.to_string().contains("t0"));
    }

    #[test]
    fn test_length_mismatch() {
        let counts = CountMatrix::from_rows(vec![1.0, 1.0], vec![1.0, 1.0]).unwrap();
        let err = log_odds_with_prior(&counts, &[0.1], &terms(2)).unwrap_err();
        assert!(err.is_configuration());
    }
}
