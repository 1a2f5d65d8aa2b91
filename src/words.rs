//! Word and placement definitions.
//!
//! A word is stored as a sequence of `char`s so that any single-character
//! alphabet works without byte-offset bookkeeping.

use std::fmt;

use crate::error::{CrossgridError, Result};
use crate::geometry::{self, Direction, Span};

/// An immutable, non-empty word to be placed on the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word {
    letters: Box<[char]>,
}

impl Word {
    /// Builds a word, rejecting the empty string.
    ///
    /// `index` is the word's position in its list and only feeds the error.
    pub fn new(text: &str, index: usize) -> Result<Self> {
        if text.is_empty() {
            return Err(CrossgridError::EmptyWord { index });
        }
        Ok(Self {
            letters: text.chars().collect(),
        })
    }

    /// Builds a word list in input order, additionally rejecting any word that
    /// contains the `blank` display marker.
    pub fn parse_list<S: AsRef<str>>(texts: &[S], blank: char) -> Result<Vec<Word>> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let text = text.as_ref();
                if text.contains(blank) {
                    return Err(CrossgridError::BlankInWord {
                        word: text.to_string(),
                        blank,
                    });
                }
                Word::new(text, index)
            })
            .collect()
    }

    #[inline]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True if the word has no letters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// A word assigned to an anchor cell and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub word: Word,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Placement {
    /// Cells covered by this placement on a `size` x `size` grid.
    pub fn cells(&self, size: usize) -> Option<Span> {
        geometry::span(size, self.row, self.col, self.direction, self.word.len())
    }

    /// True if both placements cover exactly the same run of cells.
    pub fn same_span(&self, row: usize, col: usize, direction: Direction, len: usize) -> bool {
        self.row == row && self.col == col && self.direction == direction && self.word.len() == len
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ ({}, {}) {}", self.word, self.row, self.col, self.direction)
    }
}

/// Side length of the demo grid.
pub const DEMO_SIZE: usize = 10;

/// The demo word list, placed in this order.
pub const DEMO_WORDS: &[&str] = &["apple", "banana", "grape", "orange", "peach"];
