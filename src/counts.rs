// Count aggregation: collapsing per-document rows into one row per corpus.
//
// The term counter sees corpus A's documents followed by corpus B's, one row
// per document. The boundary is a document index, never a text offset, so
// every document lands entirely on its own side.

use crate::counter::DocumentTermMatrix;
use crate::error::{FightinError, Result};

/// Total term counts for the two corpora (the 2×V count matrix).
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    /// Row 0: per-term totals over corpus A
    pub counts_a: Vec<f64>,
    /// Row 1: per-term totals over corpus B
    pub counts_b: Vec<f64>,
}

impl CountMatrix {
    /// Sum documents `[0, n_docs_a)` into corpus A and the rest into corpus B.
    pub fn from_documents(matrix: &DocumentTermMatrix, n_docs_a: usize) -> Result<Self> {
        let n_docs = matrix.n_documents();
        if n_docs_a > n_docs {
            return Err(FightinError::config(format!(
                "corpus boundary {n_docs_a} is past the last of {n_docs} documents"
            )));
        }
        Ok(Self {
            counts_a: matrix.column_sums(0..n_docs_a),
            counts_b: matrix.column_sums(n_docs_a..n_docs),
        })
    }

    /// Build directly from two per-term rows of equal length.
    pub fn from_rows(counts_a: Vec<f64>, counts_b: Vec<f64>) -> Result<Self> {
        if counts_a.len() != counts_b.len() {
            return Err(FightinError::config(format!(
                "count rows differ in length: {} vs {}",
                counts_a.len(),
                counts_b.len()
            )));
        }
        if let Some(bad) = counts_a
            .iter()
            .chain(&counts_b)
            .find(|c| !c.is_finite() || **c < 0.0)
        {
            return Err(FightinError::config(format!("invalid term count {bad}")));
        }
        Ok(Self { counts_a, counts_b })
    }

    pub fn n_terms(&self) -> usize {
        self.counts_a.len()
    }

    /// n1: total term occurrences in corpus A.
    pub fn total_a(&self) -> f64 {
        self.counts_a.iter().sum()
    }

    /// n2: total term occurrences in corpus B.
    pub fn total_b(&self) -> f64 {
        self.counts_b.iter().sum()
    }

    /// Swap the corpora.
    pub fn swapped(&self) -> Self {
        Self {
            counts_a: self.counts_b.clone(),
            counts_b: self.counts_a.clone(),
        }
    }
}
