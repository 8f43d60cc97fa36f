//! Finite-memory Markov chain over arbitrary events.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::iter::FusedIterator;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain memory must be at least 1 (got {0})")]
    InvalidMemory(usize),
    #[error("need at least {memory} events to seed the history, got {got}")]
    InsufficientData { memory: usize, got: usize },
    #[error("state not found in chain")]
    StateNotFound,
    #[error("no capitalized state to start a sentence from")]
    EmptyStartSet,
    #[error("randomness is undefined for an empty chain")]
    EmptyChain,
    #[error("state of length {got} in a chain with memory {expected}")]
    InvalidStateLength { expected: usize, got: usize },
    #[error("state with no recorded transitions")]
    EmptyTransitions,
    #[error("sentence start is not a capitalized state of the chain")]
    InvalidStartState,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    RonSer(#[from] ron::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An order-`memory` Markov chain over events of type `E`.
///
/// Each state is the tuple of the last `memory` events, stored as a
/// `Vec<E>`, and maps to every event observed to follow it during training.
/// Duplicates are kept: the frequency of an event in a state's list is its
/// empirical transition probability.
///
/// # Invariants
/// - every state key has length exactly `memory`
/// - every transition list is non-empty
/// - `memory >= 1` and never changes after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain<E: Eq + Hash> {
    memory: usize,
    transitions: FxHashMap<Vec<E>, Vec<E>>,
}

impl<E: Clone + Eq + Hash> Chain<E> {
    /// Create an empty chain remembering the last `memory` events.
    pub fn new(memory: usize) -> Result<Self, ChainError> {
        if memory < 1 {
            return Err(ChainError::InvalidMemory(memory));
        }
        Ok(Self {
            memory,
            transitions: FxHashMap::default(),
        })
    }

    /// Create a chain and train it once on `events`.
    pub fn with_training<I>(memory: usize, events: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = E>,
    {
        let mut chain = Self::new(memory)?;
        chain.train(events)?;
        Ok(chain)
    }

    /// Record the transitions of `events` into the chain.
    ///
    /// The first `memory` events seed the history; every later event is
    /// appended to the list of the current history, which then slides forward
    /// by one. Each call starts its own history, so transitions never span
    /// two calls.
    ///
    /// Returns the number of transitions recorded. If fewer than `memory`
    /// events are supplied the chain is left untouched.
    pub fn train<I>(&mut self, events: I) -> Result<usize, ChainError>
    where
        I: IntoIterator<Item = E>,
    {
        let mut events = events.into_iter();
        let mut history: Vec<E> = events.by_ref().take(self.memory).collect();
        if history.len() < self.memory {
            return Err(ChainError::InsufficientData {
                memory: self.memory,
                got: history.len(),
            });
        }

        let mut recorded = 0;
        for event in events {
            match self.transitions.get_mut(&history) {
                Some(next) => next.push(event.clone()),
                None => {
                    self.transitions.insert(history.clone(), vec![event.clone()]);
                }
            }
            history.remove(0);
            history.push(event);
            recorded += 1;
        }

        debug!(
            "trained {} transitions (memory {}, {} states)",
            recorded,
            self.memory,
            self.transitions.len()
        );
        Ok(recorded)
    }

    /// Pick one of the events observed after `state`, uniformly over the
    /// stored list.
    pub fn choice(&self, state: &[E], rng: &mut StdRng) -> Result<&E, ChainError> {
        self.transitions
            .get(state)
            .and_then(|next| next.choose(rng))
            .ok_or(ChainError::StateNotFound)
    }

    /// Walk randomly through the chain.
    ///
    /// Without a `start`, a stored state is picked uniformly and its events
    /// are yielded first. A given `start` is used as the current history and
    /// is not yielded. The walk ends when the current state has no recorded
    /// transitions; it is otherwise unbounded.
    pub fn walk<'a>(&'a self, start: Option<Vec<E>>, rng: &'a mut StdRng) -> Walk<'a, E> {
        let (seed, state) = match start {
            Some(state) => (Vec::new(), Some(state)),
            None => match self.transitions.keys().choose(&mut *rng) {
                Some(state) => (state.clone(), Some(state.clone())),
                None => (Vec::new(), None),
            },
        };

        Walk {
            chain: self,
            rng,
            seed: seed.into_iter(),
            state,
        }
    }

    /// Fraction of states whose transitions hold more than one distinct event.
    pub fn randomness(&self) -> Result<f64, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let ambiguous = self
            .transitions
            .values()
            .filter(|next| next.iter().any(|event| event != &next[0]))
            .count();
        Ok(ambiguous as f64 / self.len() as f64)
    }

    /// Every distinct event appearing in a state or in a transition list.
    pub fn events(&self) -> FxHashSet<E> {
        self.transitions
            .iter()
            .flat_map(|(state, next)| state.iter().chain(next.iter()))
            .cloned()
            .collect()
    }
}

impl<E: Eq + Hash> Chain<E> {
    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Check the chain invariants: `memory >= 1`, every state has exactly
    /// `memory` events and every transition list is non-empty.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.memory < 1 {
            return Err(ChainError::InvalidMemory(self.memory));
        }
        for (state, next) in &self.transitions {
            if state.len() != self.memory {
                return Err(ChainError::InvalidStateLength {
                    expected: self.memory,
                    got: state.len(),
                });
            }
            if next.is_empty() {
                return Err(ChainError::EmptyTransitions);
            }
        }
        Ok(())
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Total number of observed transitions across all states.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// The events observed after `state`, in training order.
    pub fn get(&self, state: &[E]) -> Option<&[E]> {
        self.transitions.get(state).map(Vec::as_slice)
    }

    pub fn contains(&self, state: &[E]) -> bool {
        self.transitions.contains_key(state)
    }

    pub fn states(&self) -> impl Iterator<Item = &[E]> {
        self.transitions.keys().map(Vec::as_slice)
    }
}

/// A random walk through a [`Chain`], produced by [`Chain::walk`].
pub struct Walk<'a, E: Eq + Hash> {
    chain: &'a Chain<E>,
    rng: &'a mut StdRng,
    /// Events of a randomly picked start state, yielded before any transition.
    seed: std::vec::IntoIter<E>,
    /// Current history; `None` once the walk hit a dead end.
    state: Option<Vec<E>>,
}

impl<E: Clone + Eq + Hash> Iterator for Walk<'_, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        if let Some(event) = self.seed.next() {
            return Some(event);
        }

        let state = self.state.as_mut()?;
        match self.chain.choice(state.as_slice(), self.rng) {
            Ok(event) => {
                let event = event.clone();
                state.remove(0);
                state.push(event.clone());
                Some(event)
            }
            Err(_) => {
                self.state = None;
                None
            }
        }
    }
}

impl<E: Clone + Eq + Hash> FusedIterator for Walk<'_, E> {}

/// Save a chain to a RON file.
pub fn save_chain<E>(chain: &Chain<E>, path: &Path) -> Result<(), ChainError>
where
    E: Eq + Hash + Serialize,
{
    let serialized = ron::ser::to_string_pretty(chain, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load a chain from a RON file, rejecting chains that break its invariants.
pub fn load_chain<E>(path: &Path) -> Result<Chain<E>, ChainError>
where
    E: Eq + Hash + DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)?;
    let chain: Chain<E> = ron::from_str(&contents)?;
    chain.validate()?;
    Ok(chain)
}
