//! Error types for puzzle input and configuration.
//!
//! Placement conflicts and unsatisfiable word lists are ordinary search
//! outcomes and never show up here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrossgridError>;

#[derive(Debug, Error)]
pub enum CrossgridError {
    #[error("Empty word at position {index} in the word list")]
    EmptyWord { index: usize },

    #[error("Word \"{word}\" contains the blank marker '{blank}'")]
    BlankInWord { word: String, blank: char },

    #[error("Invalid grid size {0}: must be at least 1")]
    InvalidSize(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
