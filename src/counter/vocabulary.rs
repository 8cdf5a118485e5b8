// Vocabulary and sparse document-term matrix.
//
// Vocabulary indices are always the contiguous range [0, len). The matrix
// stores one sparse row per input document, so the boundary between two
// corpora survives counting and can be split on later.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{FightinError, Result};

/// Bidirectional mapping between terms and dense indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary where `terms[i]` gets index `i`.
    ///
    /// Fails on duplicate terms, since the mapping would no longer be invertible.
    pub fn from_terms(terms: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(FightinError::config(format!(
                    "duplicate vocabulary term '{term}'"
                )));
            }
        }
        Ok(Self { terms, index })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The term at `index`, if any.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// The index of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// All terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Sparse term counts, one row per document.
///
/// Each row holds `(term_index, value)` pairs sorted by index with no
/// duplicates. Values are `f64` so weighted counters (tf-idf) fit too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTermMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    n_terms: usize,
}

impl DocumentTermMatrix {
    /// Build a matrix from sparse rows, validating indices and values.
    pub fn from_rows(rows: Vec<Vec<(usize, f64)>>, n_terms: usize) -> Result<Self> {
        for (doc, row) in rows.iter().enumerate() {
            let mut previous: Option<usize> = None;
            for &(index, value) in row {
                if index >= n_terms {
                    return Err(FightinError::config(format!(
                        "document {doc} references term {index} outside a vocabulary of {n_terms}"
                    )));
                }
                if previous.is_some_and(|p| p >= index) {
                    return Err(FightinError::config(format!(
                        "document {doc} has unsorted or duplicate term indices"
                    )));
                }
                if !value.is_finite() || value < 0.0 {
                    return Err(FightinError::config(format!(
                        "document {doc} has invalid count {value} for term {index}"
                    )));
                }
                previous = Some(index);
            }
        }
        Ok(Self { rows, n_terms })
    }

    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.n_terms
    }

    pub fn row(&self, doc: usize) -> Option<&[(usize, f64)]> {
        self.rows.get(doc).map(Vec::as_slice)
    }

    /// Per-term totals over the documents in `docs`.
    pub fn column_sums(&self, docs: Range<usize>) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_terms];
        for row in &self.rows[docs] {
            for &(index, value) in row {
                sums[index] += value;
            }
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_roundtrip_lookup() {
        let vocab = Vocabulary::from_terms(vec!["cat".into(), "dog".into()]).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.index_of("dog"), Some(1));
        assert_eq!(vocab.term(0), Some("cat"));
        assert_eq!(vocab.term(2), None);
        assert_eq!(vocab.index_of("bird"), None);
    }

    #[test]
    fn test_vocabulary_rejects_duplicates() {
        assert!(Vocabulary::from_terms(vec!["a".into(), "a".into()]).is_err());
    }

    #[test]
    fn test_matrix_validation() {
        assert!(DocumentTermMatrix::from_rows(vec![vec![(2, 1.0)]], 2).is_err());
        assert!(DocumentTermMatrix::from_rows(vec![vec![(1, 1.0), (0, 1.0)]], 2).is_err());
        assert!(DocumentTermMatrix::from_rows(vec![vec![(0, -1.0)]], 2).is_err());
    }

    #[test]
    fn test_column_sums_over_range() {
        let m = DocumentTermMatrix::from_rows(
            vec![vec![(0, 1.0), (1, 2.0)], vec![(1, 3.0)], vec![(0, 5.0)]],
            2,
        )
        .unwrap();
        assert_eq!(m.column_sums(0..2), vec![1.0, 5.0]);
        assert_eq!(m.column_sums(2..3), vec![5.0, 0.0]);
        assert_eq!(m.column_sums(1..1), vec![0.0, 0.0]);
    }
}
