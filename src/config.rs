use std::env;

use anyhow::{Context, Result};

use crate::counter::{CountVectorizer, StopWords, DEFAULT_MAX_FEATURES};
use crate::prior::Prior;

/// Default number of terms shown per corpus in the terminal report.
pub const DEFAULT_TOP: usize = 20;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so any of these can live
/// there instead of the shell. CLI flags override what is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    /// FIGHTIN_PRIOR: "0.01" (uniform) or a comma-separated per-term list
    pub prior: Prior,
    /// FIGHTIN_MAX_FEATURES: vocabulary cap, "0" or "none" for unlimited
    pub max_features: Option<usize>,
    /// FIGHTIN_STOP_WORDS: built-in stop word language, unset for none
    pub stop_words: Option<String>,
    /// FIGHTIN_TOP: rows per corpus in the terminal report
    pub top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prior: Prior::default(),
            max_features: Some(DEFAULT_MAX_FEATURES),
            stop_words: None,
            top: DEFAULT_TOP,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; a variable that is set but unparsable is an error.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("FIGHTIN_PRIOR") {
            config.prior = raw
                .parse()
                .with_context(|| format!("FIGHTIN_PRIOR has an invalid value '{raw}'"))?;
        }

        if let Some(raw) = lookup("FIGHTIN_MAX_FEATURES") {
            config.max_features = parse_max_features(&raw)
                .with_context(|| format!("FIGHTIN_MAX_FEATURES has an invalid value '{raw}'"))?;
        }

        config.stop_words = lookup("FIGHTIN_STOP_WORDS").filter(|s| !s.trim().is_empty());

        if let Some(raw) = lookup("FIGHTIN_TOP") {
            config.top = raw
                .trim()
                .parse()
                .with_context(|| format!("FIGHTIN_TOP has an invalid value '{raw}'"))?;
        }

        Ok(config)
    }

    /// Build the term counter described by this configuration.
    pub fn vectorizer(&self) -> Result<CountVectorizer> {
        let stop_words = match &self.stop_words {
            Some(language) => StopWords::for_language(language)?,
            None => StopWords::None,
        };
        Ok(CountVectorizer::default()
            .with_max_features(self.max_features)
            .with_stop_words(stop_words))
    }
}

/// "none" or "0" disable the cap; anything else must be a positive integer.
pub fn parse_max_features(raw: &str) -> Result<Option<usize>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let n: usize = raw.parse().context("expected a non-negative integer or 'none'")?;
    Ok(if n == 0 { None } else { Some(n) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.prior, Prior::Uniform(0.01));
        assert_eq!(config.max_features, Some(DEFAULT_MAX_FEATURES));
        assert_eq!(config.stop_words, None);
        assert_eq!(config.top, DEFAULT_TOP);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("FIGHTIN_PRIOR", "0.5"),
            ("FIGHTIN_MAX_FEATURES", "none"),
            ("FIGHTIN_STOP_WORDS", "english"),
            ("FIGHTIN_TOP", "5"),
        ]))
        .unwrap();
        assert_eq!(config.prior, Prior::Uniform(0.5));
        assert_eq!(config.max_features, None);
        assert_eq!(config.stop_words.as_deref(), Some("english"));
        assert_eq!(config.top, 5);
        assert!(config.vectorizer().is_ok());
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup(&[("FIGHTIN_PRIOR", "-1")])).unwrap_err();
        assert!(err.to_string().contains("FIGHTIN_PRIOR"));

        let err = Config::from_lookup(lookup(&[("FIGHTIN_TOP", "many")])).unwrap_err();
        assert!(err.to_string().contains("FIGHTIN_TOP"));
    }

    #[test]
    fn test_unknown_stop_word_language() {
        let config = Config {
            stop_words: Some("klingon".to_string()),
            ..Config::default()
        };
        assert!(config.vectorizer().is_err());
    }
}
