//! Direction and cell-walking utilities.
//!
//! A word occupies a straight run of cells starting at an anchor `(row, col)`
//! and extending either to the right (horizontal) or downward (vertical).

use std::fmt;

/// A `(row, col)` cell coordinate.
pub type Coord = (usize, usize);

/// Reading direction of a placed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Candidate directions in search order.
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Row and column increments for one step along this direction.
    #[inline(always)]
    pub const fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => f.write_str("H"),
            Direction::Vertical => f.write_str("V"),
        }
    }
}

/// Returns the cells of a run of `len` cells from `(row, col)` along `direction`,
/// or `None` if any of them falls outside a `size` x `size` grid.
///
/// Overflowing coordinates are treated as out of range.
pub fn span(size: usize, row: usize, col: usize, direction: Direction, len: usize) -> Option<Span> {
    if len == 0 || row >= size || col >= size {
        return None;
    }
    let (dr, dc) = direction.step();
    let last_row = row.checked_add(dr * (len - 1))?;
    let last_col = col.checked_add(dc * (len - 1))?;
    if last_row >= size || last_col >= size {
        return None;
    }
    Some(Span {
        next: (row, col),
        step: (dr, dc),
        remaining: len,
    })
}

/// Iterator over the in-bounds cells of a run, produced by [`span`].
#[derive(Clone, Debug)]
pub struct Span {
    next: Coord,
    step: (usize, usize),
    remaining: usize,
}

impl Iterator for Span {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        // only advance while cells remain so the final step cannot leave the grid
        if self.remaining > 0 {
            self.next = (current.0 + self.step.0, current.1 + self.step.1);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Span {}
