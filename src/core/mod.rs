//! Markov chain core: the generic chain and its word specialization.

pub mod chain;
pub mod word_chain;
