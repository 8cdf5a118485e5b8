// Fightin' words extractor: the public entry point.
//
// Runs the whole pipeline in one pass:
//   term counter -> count aggregation -> prior resolution -> statistic -> ranking
//
// Nothing computed here is reused by a later call. The extractor only keeps
// the last vocabulary and prior vector around so callers can inspect them.

use tracing::info;

use crate::counter::{CountVectorizer, TermCounter, Vocabulary};
use crate::counts::CountMatrix;
use crate::error::{FightinError, Result};
use crate::prior::Prior;
use crate::rank::{rank_terms, RankedTerm};
use crate::stats::{log_odds_with_prior, TermStatistic};

/// Everything computed for one comparison of two corpora.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub vocabulary: Vocabulary,
    /// Resolved per-term prior, indexed like the vocabulary
    pub priors: Vec<f64>,
    pub counts: CountMatrix,
    /// Per-term statistic, indexed like the vocabulary
    pub statistics: Vec<TermStatistic>,
    /// All terms ordered by ascending z-score
    pub ranked: Vec<RankedTerm>,
}

/// Compare two corpora and return every term ranked by z-score.
///
/// Positive scores favor `corpus_a`; the list runs from most B-distinctive
/// to most A-distinctive.
pub fn compute_distinctiveness(
    corpus_a: &[String],
    corpus_b: &[String],
    prior: &Prior,
    counter: &dyn TermCounter,
) -> Result<Vec<RankedTerm>> {
    analyze(corpus_a, corpus_b, prior, counter).map(|analysis| analysis.ranked)
}

/// Like [`compute_distinctiveness`], but keeps every intermediate result.
pub fn analyze(
    corpus_a: &[String],
    corpus_b: &[String],
    prior: &Prior,
    counter: &dyn TermCounter,
) -> Result<Analysis> {
    prior.validate()?;
    if corpus_a.is_empty() || corpus_b.is_empty() {
        return Err(FightinError::config(format!(
            "both corpora need at least one document (got {} and {})",
            corpus_a.len(),
            corpus_b.len()
        )));
    }

    let documents: Vec<String> = corpus_a.iter().chain(corpus_b).cloned().collect();
    let (vocabulary, matrix) = counter.fit_and_count(&documents)?;

    if matrix.n_documents() != documents.len() || matrix.n_terms() != vocabulary.len() {
        return Err(FightinError::config(format!(
            "term counter returned a {}x{} matrix for {} documents and {} terms",
            matrix.n_documents(),
            matrix.n_terms(),
            documents.len(),
            vocabulary.len()
        )));
    }
    if vocabulary.is_empty() {
        return Err(FightinError::config("empty vocabulary: nothing to compare"));
    }

    let counts = CountMatrix::from_documents(&matrix, corpus_a.len())?;
    let priors = prior.resolve(vocabulary.len())?;
    let statistics = log_odds_with_prior(&counts, &priors, vocabulary.terms())?;

    let z_scores: Vec<f64> = statistics.iter().map(|s| s.z_score).collect();
    let ranked = rank_terms(&vocabulary, &z_scores)?;

    info!(
        docs_a = corpus_a.len(),
        docs_b = corpus_b.len(),
        vocab_size = vocabulary.len(),
        total_a = counts.total_a(),
        total_b = counts.total_b(),
        "Computed fightin' words z-scores"
    );

    Ok(Analysis {
        vocabulary,
        priors,
        counts,
        statistics,
        ranked,
    })
}

/// Reusable extractor holding a prior and a term counter.
///
/// The prior is validated on construction. After each successful call the
/// vocabulary and resolved prior are available for inspection.
pub struct FightinWords<C: TermCounter = CountVectorizer> {
    prior: Prior,
    counter: C,
    vocabulary: Option<Vocabulary>,
    priors: Option<Vec<f64>>,
}

impl FightinWords<CountVectorizer> {
    /// Extractor with the default count vectorizer.
    pub fn new(prior: Prior) -> Result<Self> {
        Self::with_counter(prior, CountVectorizer::default())
    }
}

impl Default for FightinWords<CountVectorizer> {
    fn default() -> Self {
        Self {
            prior: Prior::default(),
            counter: CountVectorizer::default(),
            vocabulary: None,
            priors: None,
        }
    }
}

impl<C: TermCounter> FightinWords<C> {
    pub fn with_counter(prior: Prior, counter: C) -> Result<Self> {
        prior.validate()?;
        Ok(Self {
            prior,
            counter,
            vocabulary: None,
            priors: None,
        })
    }

    /// Rank every term by how distinctively it is used in `corpus_a` vs `corpus_b`.
    pub fn compute(&mut self, corpus_a: &[String], corpus_b: &[String]) -> Result<Vec<RankedTerm>> {
        self.analyze(corpus_a, corpus_b).map(|analysis| analysis.ranked)
    }

    /// Like [`FightinWords::compute`], but returns every intermediate result.
    pub fn analyze(&mut self, corpus_a: &[String], corpus_b: &[String]) -> Result<Analysis> {
        let analysis = analyze(corpus_a, corpus_b, &self.prior, &self.counter)?;
        self.vocabulary = Some(analysis.vocabulary.clone());
        self.priors = Some(analysis.priors.clone());
        Ok(analysis)
    }

    pub fn prior(&self) -> &Prior {
        &self.prior
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Vocabulary from the last successful call.
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Resolved prior vector from the last successful call.
    pub fn priors(&self) -> Option<&[f64]> {
        self.priors.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_worked_example() {
        let mut fw = FightinWords::new(Prior::Uniform(0.01)).unwrap();
        let ranked = fw
            .compute(&corpus(&["the cat sat"]), &corpus(&["the dog sat"]))
            .unwrap();

        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].term, "dog");
        assert_eq!(ranked[3].term, "cat");
        // cat: delta ~ 5.02, sd ~ 10.05 -> z ~ 0.499
        assert!(ranked[3].z_score > 0.45);
        assert!(ranked[0].z_score < -0.45);

        for shared in ["the", "sat"] {
            let z = ranked.iter().find(|r| r.term == shared).unwrap().z_score;
            assert!(z.abs() < 1e-9, "{shared} should be ~0, got {z}");
        }
    }

    #[test]
    fn test_inspection_state_after_call() {
        let mut fw: FightinWords = FightinWords::default();
        assert!(fw.vocabulary().is_none());
        fw.compute(&corpus(&["aa bb"]), &corpus(&["bb cc"])).unwrap();
        assert_eq!(fw.vocabulary().unwrap().terms(), &["aa", "bb", "cc"]);
        assert_eq!(fw.priors().unwrap(), &[0.01, 0.01, 0.01]);
    }

    #[test]
    fn test_invalid_prior_rejected_at_construction() {
        assert!(FightinWords::new(Prior::Uniform(0.0)).is_err());
        assert!(FightinWords::new(Prior::Explicit(vec![1.0, -1.0])).is_err());
    }

    #[test]
    fn test_empty_corpus_is_configuration_error() {
        let mut fw: FightinWords = FightinWords::default();
        let err = fw.compute(&[], &corpus(&["some words"])).unwrap_err();
        assert!(err.is_configuration());
        let err = fw.compute(&corpus(&["some words"]), &[]).unwrap_err();
        assert!(err.is_configuration());
    }
}
