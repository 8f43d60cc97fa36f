//! Word chains: sentence generation on top of [`Chain`].

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::chain::{Chain, ChainError};

/// Trailing characters that end a generated sentence.
const SENTENCE_ENDERS: &[char] = &['.', '?', '!'];

/// A [`Chain`] of words that can produce whole sentences.
///
/// Sentences start from a state whose first word is capitalized. That set of
/// start states is computed when the chain is built and stays frozen: words
/// added later through [`WordChain::train`] never become new starts unless
/// [`WordChain::refresh_starts`] is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordChain {
    chain: Chain<String>,
    capitalized: Vec<Vec<String>>,
}

impl WordChain {
    /// Train a chain over `words` with the given memory.
    pub fn new<I, S>(words: I, memory: usize) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chain = Chain::<String>::with_training(memory, words.into_iter().map(Into::into))?;
        Ok(Self::from_chain(chain))
    }

    /// Wrap an already trained chain.
    pub fn from_chain(chain: Chain<String>) -> Self {
        let capitalized = capitalized_states(&chain);
        debug!(
            "word chain ready: {} states, {} sentence starts",
            chain.len(),
            capitalized.len()
        );
        Self { chain, capitalized }
    }

    pub fn chain(&self) -> &Chain<String> {
        &self.chain
    }

    pub fn into_chain(self) -> Chain<String> {
        self.chain
    }

    /// States usable as the start of a sentence.
    pub fn capitalized(&self) -> &[Vec<String>] {
        &self.capitalized
    }

    /// Add more words to the underlying chain. The start set is left as it was.
    pub fn train<I, S>(&mut self, words: I) -> Result<usize, ChainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chain.train(words.into_iter().map(Into::into))
    }

    /// Recompute the start set from the current chain.
    pub fn refresh_starts(&mut self) {
        self.capitalized = capitalized_states(&self.chain);
    }

    /// Generate one sentence.
    ///
    /// The words of a random capitalized state open the sentence, then the
    /// chain is walked until a word ends in `.`, `?` or `!`. A walk that runs
    /// into a dead end first is returned as-is, without a terminator.
    pub fn sentence(&self, rng: &mut StdRng) -> Result<String, ChainError> {
        let start = self
            .capitalized
            .choose(rng)
            .ok_or(ChainError::EmptyStartSet)?;

        let mut words = start.clone();
        for word in self.chain.walk(Some(start.clone()), rng) {
            let done = ends_sentence(&word);
            words.push(word);
            if done {
                break;
            }
        }

        Ok(words.join(" "))
    }
}

fn capitalized_states(chain: &Chain<String>) -> Vec<Vec<String>> {
    chain
        .states()
        .filter(|state| starts_capitalized(state))
        .map(<[String]>::to_vec)
        .collect()
}

/// Whether the first character of the first word is uppercase.
fn starts_capitalized(state: &[String]) -> bool {
    state
        .first()
        .and_then(|word| word.chars().next())
        .is_some_and(char::is_uppercase)
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with(SENTENCE_ENDERS)
}

/// Split lines of text into whitespace-delimited words.
///
/// Line order and word order are kept, punctuation stays attached to its word.
pub fn words_from_text<I, S>(lines: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().flat_map(|line| {
        line.as_ref()
            .split_whitespace()
            .map(str::to_owned)
            .collect::<Vec<_>>()
    })
}

/// Save a word chain to a RON file.
pub fn save_word_chain(chain: &WordChain, path: &Path) -> Result<(), ChainError> {
    let serialized = ron::ser::to_string_pretty(chain, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load a word chain from a RON file.
///
/// Files holding a bare [`Chain`] are accepted as well; their start set is
/// computed on load. A stored start set must only hold capitalized states of
/// the chain.
pub fn load_word_chain(path: &Path) -> Result<WordChain, ChainError> {
    let contents = std::fs::read_to_string(path)?;
    let loaded = match ron::from_str::<WordChain>(&contents) {
        Ok(loaded) => loaded,
        Err(word_chain_err) => match ron::from_str::<Chain<String>>(&contents) {
            Ok(chain) => {
                chain.validate()?;
                return Ok(WordChain::from_chain(chain));
            }
            Err(_) => return Err(word_chain_err.into()),
        },
    };

    loaded.chain.validate()?;
    let valid_start =
        |state: &Vec<String>| starts_capitalized(state) && loaded.chain.contains(state);
    if !loaded.capitalized.iter().all(valid_start) {
        return Err(ChainError::InvalidStartState);
    }
    Ok(loaded)
}
