//! Grid representation and cell operations.
//!
//! The grid is a flat, row-major array of `size * size` cells. Each cell holds
//! a letter or `None` for blank, plus a count of how many committed placements
//! currently cover it. The count lets crossing words be removed in any order
//! without erasing each other's shared letters.

use std::fmt;

use crate::error::{CrossgridError, Result};
use crate::geometry::{Coord, Span};

/// Marker used when rendering blank cells.
pub const DEFAULT_BLANK: char = '.';

/// Converts a `(row, col)` coordinate to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx(size: usize, row: usize, col: usize) -> usize {
    row * size + col
}

/// Converts a linear cell index to a `(row, col)` coordinate.
#[inline(always)]
pub const fn idx_to_coord(size: usize, cell_index: usize) -> Coord {
    (cell_index / size, cell_index % size)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
    coverage: Vec<u32>,
}

impl Grid {
    /// Allocates an all-blank `size` x `size` grid.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(CrossgridError::InvalidSize(size));
        }
        let cell_count = size
            .checked_mul(size)
            .ok_or(CrossgridError::InvalidSize(size))?;
        Ok(Self {
            size,
            cells: vec![None; cell_count],
            coverage: vec![0; cell_count],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at `(row, col)`, or `None` if the cell is blank or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[coord_to_idx(self.size, row, col)]
    }

    /// Number of committed placements covering `(row, col)`.
    pub fn coverage(&self, row: usize, col: usize) -> u32 {
        if row >= self.size || col >= self.size {
            return 0;
        }
        self.coverage[coord_to_idx(self.size, row, col)]
    }

    /// True if every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Checks that each cell of `span` is blank or already holds the matching letter.
    pub(crate) fn accepts(&self, span: Span, letters: &[char]) -> bool {
        span.zip(letters)
            .all(|((row, col), &letter)| match self.cells[coord_to_idx(self.size, row, col)] {
                None => true,
                Some(existing) => existing == letter,
            })
    }

    /// Writes `letters` along `span` and bumps the coverage of each cell.
    ///
    /// Callers must have checked the span with [`Grid::accepts`].
    pub(crate) fn write(&mut self, span: Span, letters: &[char]) {
        for ((row, col), &letter) in span.zip(letters) {
            let idx = coord_to_idx(self.size, row, col);
            debug_assert!(self.cells[idx].map_or(true, |existing| existing == letter));
            self.cells[idx] = Some(letter);
            self.coverage[idx] += 1;
        }
    }

    /// Drops one level of coverage along `span`, blanking cells nothing else covers.
    pub(crate) fn release(&mut self, span: Span) {
        for (row, col) in span {
            let idx = coord_to_idx(self.size, row, col);
            debug_assert!(self.coverage[idx] > 0, "releasing uncovered cell ({row}, {col})");
            self.coverage[idx] = self.coverage[idx].saturating_sub(1);
            if self.coverage[idx] == 0 {
                self.cells[idx] = None;
            }
        }
    }

    /// Returns the grid as rows of characters, with `blank` in empty cells.
    pub fn rows(&self, blank: char) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.unwrap_or(blank)).collect())
            .collect()
    }

    /// Formats the grid row by row, cells separated by a space.
    pub fn format(&self, blank: char) -> String {
        let mut output = String::with_capacity(self.cells.len() * 2);
        for row in self.cells.chunks(self.size) {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    output.push(' ');
                }
                output.push(cell.unwrap_or(blank));
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_BLANK))
    }
}
