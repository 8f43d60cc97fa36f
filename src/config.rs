//! Generator configuration, loaded from RON.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::corpus::source::DEFAULT_SOURCE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("memory must be at least 1 (got {0})")]
    InvalidMemory(usize),
    #[error("sentence count must be at least 1")]
    InvalidSentences,
}

/// Settings for a sentence generation run.
///
/// Every field has a default, so a config file only needs the fields it
/// changes, e.g. `(memory: 3, seed: Some(7))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of previous words a state remembers.
    pub memory: usize,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Number of sentences to generate.
    pub sentences: usize,
    pub source_url: String,
    /// Where the downloaded play page is cached.
    pub cache_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            memory: 2,
            seed: None,
            sentences: 1,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: PathBuf::from("data/hamlet.html"),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a config from a RON string.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory < 1 {
            return Err(ConfigError::InvalidMemory(self.memory));
        }
        if self.sentences < 1 {
            return Err(ConfigError::InvalidSentences);
        }
        Ok(())
    }

    /// The RNG for this run: seeded if a seed is set, from entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn empty_config_uses_defaults() {
        let config = GeneratorConfig::from_ron_str("()").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.memory, 2);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config =
            GeneratorConfig::from_ron_str("(memory: 3, seed: Some(7), sentences: 5)").unwrap();
        assert_eq!(config.memory, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.sentences, 5);
        assert_eq!(config.cache_path, PathBuf::from("data/hamlet.html"));
    }

    #[test]
    fn zero_memory_is_rejected() {
        let err = GeneratorConfig::from_ron_str("(memory: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMemory(0)));
    }

    #[test]
    fn zero_sentences_is_rejected() {
        let err = GeneratorConfig::from_ron_str("(sentences: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSentences));
    }

    #[test]
    fn malformed_config_is_a_ron_error() {
        let err = GeneratorConfig::from_ron_str("(memory: \"two\")").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = GeneratorConfig {
            seed: Some(42),
            ..GeneratorConfig::default()
        };
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
