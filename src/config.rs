//! Puzzle configuration loaded from a TOML file.
//!
//! ```toml
//! size = 10
//! words = ["apple", "banana", "grape"]
//! blank = "."
//! max_placements = 100000
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{CrossgridError, Result};
use crate::grid::DEFAULT_BLANK;
use crate::solver::SolveOptions;
use crate::words::{Word, DEMO_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Grid side length.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Words to place, in search order.
    #[serde(default)]
    pub words: Vec<String>,
    /// Character shown for empty cells; may not appear in any word.
    #[serde(default = "default_blank")]
    pub blank: char,
    /// Optional cap on placements made during the search.
    #[serde(default)]
    pub max_placements: Option<u64>,
}

fn default_size() -> usize {
    DEMO_SIZE
}

fn default_blank() -> char {
    DEFAULT_BLANK
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: default_size(),
            words: Vec::new(),
            blank: default_blank(),
            max_placements: None,
        }
    }
}

impl Config {
    /// Reads, parses, and validates a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = Self::read_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file without validating it, so that
    /// overrides can be applied before [`Config::validate`].
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("read config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(CrossgridError::InvalidSize(self.size));
        }
        if self.max_placements == Some(0) {
            return Err(CrossgridError::Config(
                "max_placements must be at least 1 when set".to_string(),
            ));
        }
        self.parsed_words().map(|_| ())
    }

    /// The configured words, checked for emptiness and the blank marker.
    pub fn parsed_words(&self) -> Result<Vec<Word>> {
        Word::parse_list(&self.words, self.blank)
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_placements: self.max_placements,
        }
    }
}
