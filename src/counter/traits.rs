// Term counter trait: swap-ready abstraction over the tokenizer.
//
// Implementations must be pure with respect to `&self`: every call fits a
// fresh vocabulary and returns it alongside the counts, so one counter can be
// shared between threads without anyone observing another call's vocabulary.

use super::vocabulary::{DocumentTermMatrix, Vocabulary};
use crate::error::Result;

/// Maps documents to a vocabulary and one row of term counts per document.
pub trait TermCounter: Send + Sync {
    /// Build a vocabulary over `documents` and count every term in every document.
    ///
    /// The returned matrix must have exactly `documents.len()` rows, in input
    /// order, and `vocabulary.len()` columns.
    fn fit_and_count(&self, documents: &[String]) -> Result<(Vocabulary, DocumentTermMatrix)>;
}
