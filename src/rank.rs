// Ranking: pairing z-scores with their terms, most B-distinctive first.

use serde::{Deserialize, Serialize};

use crate::counter::Vocabulary;
use crate::error::{FightinError, Result};

/// One row of the result: a term and its standardized log-odds-ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub z_score: f64,
}

/// Order every vocabulary term by ascending z-score.
///
/// The sort is stable over vocabulary index, so equal scores keep index order.
/// No terms are dropped.
pub fn rank_terms(vocabulary: &Vocabulary, z_scores: &[f64]) -> Result<Vec<RankedTerm>> {
    if z_scores.len() != vocabulary.len() {
        return Err(FightinError::config(format!(
            "{} z-scores for a vocabulary of {} terms",
            z_scores.len(),
            vocabulary.len()
        )));
    }

    let mut order: Vec<usize> = (0..z_scores.len()).collect();
    order.sort_by(|&a, &b| z_scores[a].total_cmp(&z_scores[b]));

    Ok(order
        .into_iter()
        .map(|i| RankedTerm {
            term: vocabulary.terms()[i].clone(),
            z_score: z_scores[i],
        })
        .collect())
}

/// The `k` terms most distinctive of corpus A, strongest first.
pub fn top_favoring_a(ranked: &[RankedTerm], k: usize) -> Vec<&RankedTerm> {
    ranked
        .iter()
        .rev()
        .take(k)
        .filter(|t| t.z_score > 0.0)
        .collect()
}

/// The `k` terms most distinctive of corpus B, strongest first.
pub fn top_favoring_b(ranked: &[RankedTerm], k: usize) -> Vec<&RankedTerm> {
    ranked
        .iter()
        .take(k)
        .filter(|t| t.z_score < 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vocabulary {
        Vocabulary::from_terms(terms.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_ascending_with_index_tiebreak() {
        let v = vocab(&["a", "b", "c", "d"]);
        let ranked = rank_terms(&v, &[0.5, -1.0, 0.5, 2.0]).unwrap();
        let terms: Vec<&str> = ranked.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_top_helpers() {
        let v = vocab(&["a", "b", "c", "d"]);
        let ranked = rank_terms(&v, &[0.5, -1.0, 0.0, 2.0]).unwrap();

        let a: Vec<&str> = top_favoring_a(&ranked, 3).iter().map(|r| r.term.as_str()).collect();
        assert_eq!(a, vec!["d", "a"]);

        let b: Vec<&str> = top_favoring_b(&ranked, 3).iter().map(|r| r.term.as_str()).collect();
        assert_eq!(b, vec!["b"]);
    }

    #[test]
    fn test_length_mismatch() {
        let v = vocab(&["a", "b"]);
        assert!(rank_terms(&v, &[1.0]).is_err());
    }
}
