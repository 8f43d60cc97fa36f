//! Training text acquisition: fetching play pages and extracting dialogue.

pub mod dialogue;
pub mod source;
