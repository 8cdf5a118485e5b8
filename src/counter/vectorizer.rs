// Bag-of-words count vectorizer: the default TermCounter.
//
// Tokenizes each document with a configurable regex, optionally drops stop
// words and builds word n-grams, then counts terms per document. The
// vocabulary is capped at `max_features` by total frequency and finally
// indexed in lexical order, so the same documents always produce the same
// vocabulary and the same column layout.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

use super::traits::TermCounter;
use super::vocabulary::{DocumentTermMatrix, Vocabulary};
use crate::error::{FightinError, Result};

/// Default cap on vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 15_000;

/// Two or more Unicode word characters.
const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// How per-document term occurrences become matrix values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TermWeighting {
    /// Raw occurrence counts.
    #[default]
    Count,
    /// 1.0 if the term occurs in the document at all.
    Binary,
    /// Counts scaled by smoothed idf, each document row L2-normalized.
    TfIdf,
}

/// Stop words removed before n-grams are built.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StopWords {
    #[default]
    None,
    List(HashSet<String>),
}

impl StopWords {
    /// Built-in list for a language name like "english" or "fr".
    pub fn for_language(name: &str) -> Result<Self> {
        let language = match name.trim().to_lowercase().as_str() {
            "english" | "en" => LANGUAGE::English,
            "french" | "fr" => LANGUAGE::French,
            "german" | "de" => LANGUAGE::German,
            "spanish" | "es" => LANGUAGE::Spanish,
            "italian" | "it" => LANGUAGE::Italian,
            "portuguese" | "pt" => LANGUAGE::Portuguese,
            "dutch" | "nl" => LANGUAGE::Dutch,
            other => {
                return Err(FightinError::config(format!(
                    "no built-in stop word list for '{other}'"
                )))
            }
        };
        let words: Vec<String> = get(language);
        Ok(Self::List(words.into_iter().collect()))
    }

    /// A caller-supplied stop word list.
    pub fn custom<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(words.into_iter().map(Into::into).collect())
    }

    fn contains(&self, token: &str) -> bool {
        match self {
            Self::None => false,
            Self::List(words) => words.contains(token),
        }
    }
}

/// Configurable bag-of-words term counter.
///
/// Holds configuration only; fitting never mutates it, so a single instance
/// can be shared freely.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    /// Lowercase documents before tokenizing
    pub lowercase: bool,
    /// Token regex. With one capture group, the group is the token.
    pub token_pattern: Regex,
    /// Inclusive (min_n, max_n) range of word n-gram lengths
    pub ngram_range: (usize, usize),
    pub stop_words: StopWords,
    /// Keep only this many most frequent terms (None = unlimited)
    pub max_features: Option<usize>,
    pub weighting: TermWeighting,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self {
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: (1, 1),
            stop_words: StopWords::None,
            max_features: Some(DEFAULT_MAX_FEATURES),
            weighting: TermWeighting::Count,
        }
    }
}

fn default_token_pattern() -> Regex {
    Regex::new(DEFAULT_TOKEN_PATTERN).expect("default token pattern is valid")
}

impl CountVectorizer {
    /// Replace the token pattern. At most one capture group is allowed.
    pub fn with_token_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| FightinError::config(format!("invalid token pattern: {e}")))?;
        if regex.captures_len() > 2 {
            return Err(FightinError::config(
                "token pattern may contain at most one capture group",
            ));
        }
        self.token_pattern = regex;
        Ok(self)
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_weighting(mut self, weighting: TermWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(FightinError::config(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            )));
        }
        if self.max_features == Some(0) {
            return Err(FightinError::config("max_features must be at least 1"));
        }
        if self.token_pattern.captures_len() > 2 {
            return Err(FightinError::config(
                "token pattern may contain at most one capture group",
            ));
        }
        Ok(())
    }

    /// Split a document into the terms it contributes (tokens or n-grams).
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<String> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .collect()
        };

        let tokens: Vec<String> = tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n.min(tokens.len()) {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
                continue;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl TermCounter for CountVectorizer {
    fn fit_and_count(&self, documents: &[String]) -> Result<(Vocabulary, DocumentTermMatrix)> {
        self.validate()?;

        // First pass: provisional ids in order of first appearance
        let mut provisional: HashMap<String, usize> = HashMap::new();
        let mut provisional_terms: Vec<String> = Vec::new();
        let mut rows: Vec<HashMap<usize, f64>> = Vec::with_capacity(documents.len());

        for document in documents {
            let mut row: HashMap<usize, f64> = HashMap::new();
            for term in self.analyze(document) {
                let id = match provisional.get(&term) {
                    Some(&id) => id,
                    None => {
                        let id = provisional_terms.len();
                        provisional.insert(term.clone(), id);
                        provisional_terms.push(term);
                        id
                    }
                };
                *row.entry(id).or_insert(0.0) += 1.0;
            }
            rows.push(row);
        }

        if provisional_terms.is_empty() {
            return Err(FightinError::config(
                "empty vocabulary: documents contain no countable terms",
            ));
        }

        let mut totals = vec![0.0_f64; provisional_terms.len()];
        for row in &rows {
            for (&id, &count) in row {
                totals[id] += count;
            }
        }

        let mut kept: Vec<usize> = (0..provisional_terms.len()).collect();
        if let Some(limit) = self.max_features {
            if kept.len() > limit {
                kept.sort_by(|&a, &b| {
                    totals[b]
                        .total_cmp(&totals[a])
                        .then_with(|| provisional_terms[a].cmp(&provisional_terms[b]))
                });
                warn!(
                    terms = kept.len(),
                    max_features = limit,
                    "Vocabulary truncated to the most frequent terms"
                );
                kept.truncate(limit);
            }
        }
        kept.sort_by(|&a, &b| provisional_terms[a].cmp(&provisional_terms[b]));

        let mut remap: Vec<Option<usize>> = vec![None; provisional_terms.len()];
        for (new_id, &old_id) in kept.iter().enumerate() {
            remap[old_id] = Some(new_id);
        }

        let n_terms = kept.len();
        let mut sparse: Vec<Vec<(usize, f64)>> = rows
            .into_iter()
            .map(|row| {
                let mut entries: Vec<(usize, f64)> = row
                    .into_iter()
                    .filter_map(|(id, count)| remap[id].map(|new_id| (new_id, count)))
                    .collect();
                entries.sort_by_key(|&(id, _)| id);
                entries
            })
            .collect();

        apply_weighting(&mut sparse, n_terms, self.weighting);

        let terms: Vec<String> = kept
            .iter()
            .map(|&id| provisional_terms[id].clone())
            .collect();

        debug!(
            documents = documents.len(),
            vocab_size = n_terms,
            "Counted terms"
        );

        Ok((
            Vocabulary::from_terms(terms)?,
            DocumentTermMatrix::from_rows(sparse, n_terms)?,
        ))
    }
}

fn apply_weighting(rows: &mut [Vec<(usize, f64)>], n_terms: usize, weighting: TermWeighting) {
    match weighting {
        TermWeighting::Count => {}
        TermWeighting::Binary => {
            for row in rows.iter_mut() {
                for entry in row.iter_mut() {
                    entry.1 = 1.0;
                }
            }
        }
        TermWeighting::TfIdf => {
            let n_docs = rows.len() as f64;
            let mut df = vec![0.0_f64; n_terms];
            for row in rows.iter() {
                for &(id, _) in row {
                    df[id] += 1.0;
                }
            }
            let idf: Vec<f64> = df
                .iter()
                .map(|&d| ((1.0 + n_docs) / (1.0 + d)).ln() + 1.0)
                .collect();

            for row in rows.iter_mut() {
                for entry in row.iter_mut() {
                    entry.1 *= idf[entry.0];
                }
                let norm = row.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for entry in row.iter_mut() {
                        entry.1 /= norm;
                    }
                }
            }
        }
    }
}
