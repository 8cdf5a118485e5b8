// Error taxonomy for the fightin' words computation.
//
// Configuration problems (bad priors, bad counter settings, empty corpora) are
// caught before any arithmetic runs. Numeric errors should be unreachable with
// strictly positive priors, but we surface them instead of emitting NaN/Inf.

use thiserror::Error;

/// Errors returned by the library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FightinError {
    /// Invalid prior, prior/vocabulary size mismatch, bad term counter settings,
    /// or inputs with nothing to compare.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A zero/negative denominator or a non-finite score for a term.
    #[error("numeric error for term '{term}': {detail}")]
    Numeric { term: String, detail: String },
}

impl FightinError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}

pub type Result<T> = std::result::Result<T, FightinError>;
