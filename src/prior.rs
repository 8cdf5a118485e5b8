// Informative Dirichlet prior: the pseudo-counts smoothed over every term.
//
// A prior is either uniform (one scalar applied to every vocabulary term) or
// explicit (one value per term, supplied by a caller who also controls the
// vocabulary). It is validated when constructed and resolved into a concrete
// per-term vector once the vocabulary size is known.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FightinError, Result};

/// Default uniform pseudo-count per term.
pub const DEFAULT_PRIOR: f64 = 0.01;

/// A prior specification, resolved into a per-term vector by [`Prior::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Prior {
    /// The same pseudo-count for every term.
    Uniform(f64),
    /// One pseudo-count per vocabulary index. Length must match the vocabulary.
    Explicit(Vec<f64>),
}

impl Default for Prior {
    fn default() -> Self {
        Self::Uniform(DEFAULT_PRIOR)
    }
}

impl Prior {
    /// Build a validated uniform prior.
    pub fn uniform(value: f64) -> Result<Self> {
        let prior = Self::Uniform(value);
        prior.validate()?;
        Ok(prior)
    }

    /// Build a validated explicit per-term prior.
    pub fn explicit(values: Vec<f64>) -> Result<Self> {
        let prior = Self::Explicit(values);
        prior.validate()?;
        Ok(prior)
    }

    /// Check that every pseudo-count is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Uniform(value) => check_positive(*value, None),
            Self::Explicit(values) => {
                if values.is_empty() {
                    return Err(FightinError::config("explicit prior is empty"));
                }
                values
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, v)| check_positive(*v, Some(i)))
            }
        }
    }

    /// Produce the length-`vocab_size` prior vector.
    ///
    /// Fails if an explicit prior's length differs from the vocabulary size.
    pub fn resolve(&self, vocab_size: usize) -> Result<Vec<f64>> {
        self.validate()?;
        match self {
            Self::Uniform(value) => {
                debug!(vocab_size, prior = value, "Resolved uniform prior");
                Ok(vec![*value; vocab_size])
            }
            Self::Explicit(values) => {
                if values.len() != vocab_size {
                    return Err(FightinError::config(format!(
                        "prior size mismatch: {} priors for a vocabulary of {} terms",
                        values.len(),
                        vocab_size
                    )));
                }
                debug!(vocab_size, "Resolved explicit prior");
                Ok(values.clone())
            }
        }
    }
}

fn check_positive(value: f64, index: Option<usize>) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    let location = match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    };
    Err(FightinError::config(format!(
        "prior values must be finite and strictly positive, got {value}{location}"
    )))
}

impl fmt::Display for Prior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(value) => write!(f, "{value}"),
            Self::Explicit(values) => write!(f, "explicit[{}]", values.len()),
        }
    }
}

/// Parses `"0.01"` as a uniform prior and `"0.1,0.2,0.3"` as an explicit one.
impl FromStr for Prior {
    type Err = FightinError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FightinError::config("prior is empty"));
        }

        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                FightinError::config(format!("prior value '{}' is not a number", part.trim()))
            })
        };

        if s.contains(',') {
            let values = s.split(',').map(parse).collect::<Result<Vec<f64>>>()?;
            Self::explicit(values)
        } else {
            Self::uniform(parse(s)?)
        }
    }
}
