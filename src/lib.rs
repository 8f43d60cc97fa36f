//! Infinite Monkeys: Markov chain sentence generation.
//!
//! Trains a finite-memory Markov chain over a sequence of words and walks
//! it randomly to produce new sentences that read like the training text,
//! classically the dialogue of Shakespeare's "Hamlet".

pub mod config;
pub mod core;
pub mod corpus;
