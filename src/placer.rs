//! The grid placer: validation, placement, and removal of words.
//!
//! `place` is the only writer of grid cells. It hands back a [`Committed`]
//! handle, and `remove` consumes that handle, so a placement can only be
//! undone once and only after it was actually committed.

use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

use crate::error::Result;
use crate::geometry::{self, Direction};
use crate::grid::{coord_to_idx, idx_to_coord, Grid};
use crate::words::{Placement, Word};

/// Source of placer identities, so handles cannot cross between placers.
static NEXT_PLACER_ID: AtomicU64 = AtomicU64::new(0);

/// Proof that a placement was committed by a specific [`Placer`].
///
/// Deliberately neither `Clone` nor `Copy`: [`Placer::remove`] takes it by value.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a handle makes the placement impossible to remove"]
pub struct Committed {
    placer: u64,
    serial: u64,
}

/// Owns the grid and the record of committed placements.
#[derive(Debug)]
pub struct Placer {
    id: u64,
    grid: Grid,
    /// Committed placements in commit order, tagged with their handle serial.
    committed: Vec<(u64, Placement)>,
    next_serial: u64,
}

impl Placer {
    /// Creates a placer over an all-blank `size` x `size` grid.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            id: NEXT_PLACER_ID.fetch_add(1, Ordering::Relaxed),
            grid: Grid::new(size)?,
            committed: Vec::new(),
            next_serial: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the placer, returning the grid in its current state.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Currently committed placements, oldest first.
    pub fn committed(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.committed.iter().map(|(_, placement)| placement)
    }

    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Returns true if `word` can be placed at `(row, col)` along `direction`.
    ///
    /// The word must fit inside the grid and every covered cell must be blank
    /// or already hold the same letter. A run identical to one that is already
    /// committed is rejected so that every word gets a placement of its own.
    /// Out-of-range coordinates simply yield false.
    pub fn is_valid_position(&self, word: &Word, row: usize, col: usize, direction: Direction) -> bool {
        let Some(cells) = geometry::span(self.size(), row, col, direction, word.len()) else {
            return false;
        };
        if self
            .committed()
            .any(|placement| placement.same_span(row, col, direction, word.len()))
        {
            return false;
        }
        self.grid.accepts(cells, word.letters())
    }

    /// Validates and commits a placement.
    ///
    /// Returns `None` without touching the grid if the position is not valid.
    pub fn place(&mut self, word: &Word, row: usize, col: usize, direction: Direction) -> Option<Committed> {
        if !self.is_valid_position(word, row, col, direction) {
            return None;
        }
        let cells = geometry::span(self.size(), row, col, direction, word.len())?;
        self.grid.write(cells, word.letters());

        let serial = self.next_serial;
        self.next_serial += 1;
        let placement = Placement {
            word: word.clone(),
            row,
            col,
            direction,
        };
        trace!("place {placement}");
        self.committed.push((serial, placement));

        Some(Committed {
            placer: self.id,
            serial,
        })
    }

    /// Undoes a committed placement and returns it.
    ///
    /// Cells still covered by another committed placement keep their letter.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was issued by a different placer.
    pub fn remove(&mut self, handle: Committed) -> Placement {
        assert_eq!(
            handle.placer, self.id,
            "placement handle was issued by a different placer"
        );
        let Some(position) = self
            .committed
            .iter()
            .rposition(|(serial, _)| *serial == handle.serial)
        else {
            unreachable!("handle {} is live but not committed", handle.serial);
        };
        let (_, placement) = self.committed.remove(position);
        if let Some(cells) = placement.cells(self.size()) {
            self.grid.release(cells);
        }
        trace!("remove {placement}");
        placement
    }

    /// Rebuilds the grid from the committed placements and compares it with
    /// the live grid.
    ///
    /// True when every non-blank cell is explained by committed placements and
    /// no two placements disagree on a shared cell.
    pub fn is_consistent(&self) -> bool {
        let size = self.size();
        let mut expected = vec![None; size * size];
        let mut coverage = vec![0u32; size * size];
        for placement in self.committed() {
            let Some(cells) = placement.cells(size) else {
                return false;
            };
            for ((row, col), &letter) in cells.zip(placement.word.letters()) {
                let idx = coord_to_idx(size, row, col);
                match expected[idx] {
                    Some(existing) if existing != letter => return false,
                    _ => expected[idx] = Some(letter),
                }
                coverage[idx] += 1;
            }
        }
        (0..size * size).all(|idx| {
            let (row, col) = idx_to_coord(size, idx);
            self.grid.get(row, col) == expected[idx] && self.grid.coverage(row, col) == coverage[idx]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text, 0).unwrap()
    }

    #[test]
    fn test_valid_position_on_empty_grid() {
        let placer = Placer::new(5).unwrap();
        assert!(placer.is_valid_position(&word("abc"), 0, 0, Direction::Horizontal));
        assert!(placer.is_valid_position(&word("abc"), 2, 4, Direction::Vertical));
        assert!(placer.is_valid_position(&word("abcde"), 4, 0, Direction::Horizontal));
    }

    #[test]
    fn test_out_of_bounds_is_invalid_not_an_error() {
        let placer = Placer::new(5).unwrap();
        assert!(!placer.is_valid_position(&word("abc"), 0, 3, Direction::Horizontal));
        assert!(!placer.is_valid_position(&word("abc"), 3, 0, Direction::Vertical));
        assert!(!placer.is_valid_position(&word("a"), 5, 0, Direction::Horizontal));
        assert!(!placer.is_valid_position(&word("a"), 0, usize::MAX, Direction::Vertical));
        assert!(!placer.is_valid_position(&word("abcdef"), 0, 0, Direction::Horizontal));
    }

    #[test]
    fn test_conflicting_letter_is_invalid() {
        let mut placer = Placer::new(4).unwrap();
        let _at = placer.place(&word("at"), 0, 0, Direction::Horizontal).unwrap();
        assert!(!placer.is_valid_position(&word("xy"), 0, 0, Direction::Vertical));
        assert!(placer.is_valid_position(&word("to"), 0, 1, Direction::Vertical));
        // case-sensitive: 'T' does not match 't'
        assert!(!placer.is_valid_position(&word("To"), 0, 1, Direction::Vertical));
    }

    #[test]
    fn test_invalid_place_leaves_grid_untouched() {
        let mut placer = Placer::new(3).unwrap();
        let before = placer.grid().clone();
        assert!(placer.place(&word("abcd"), 0, 0, Direction::Horizontal).is_none());
        assert_eq!(placer.grid(), &before);
        assert_eq!(placer.committed_count(), 0);
    }

    #[test]
    fn test_place_writes_letters() {
        let mut placer = Placer::new(5).unwrap();
        let _handle = placer.place(&word("abc"), 1, 2, Direction::Vertical).unwrap();
        assert_eq!(placer.grid().get(1, 2), Some('a'));
        assert_eq!(placer.grid().get(2, 2), Some('b'));
        assert_eq!(placer.grid().get(3, 2), Some('c'));
        assert_eq!(placer.committed_count(), 1);
        assert!(placer.is_consistent());
    }

    #[test]
    fn test_remove_is_exact_inverse() {
        let mut placer = Placer::new(4).unwrap();
        let before = placer.grid().clone();
        let handle = placer.place(&word("abcd"), 2, 0, Direction::Horizontal).unwrap();
        let removed = placer.remove(handle);
        assert_eq!(removed.word, word("abcd"));
        assert_eq!(placer.grid(), &before);
        assert_eq!(placer.committed_count(), 0);
    }

    #[test]
    fn test_crossing_words_removed_in_either_order() {
        for remove_across_first in [true, false] {
            let mut placer = Placer::new(4).unwrap();
            let across = placer.place(&word("at"), 0, 0, Direction::Horizontal).unwrap();
            let down = placer.place(&word("to"), 0, 1, Direction::Vertical).unwrap();
            assert!(placer.is_consistent());

            if remove_across_first {
                placer.remove(across);
                assert_eq!(placer.grid().get(0, 0), None);
                assert_eq!(placer.grid().get(0, 1), Some('t'));
                assert_eq!(placer.grid().get(1, 1), Some('o'));
                assert!(placer.is_consistent());
                placer.remove(down);
            } else {
                placer.remove(down);
                assert_eq!(placer.grid().get(0, 0), Some('a'));
                assert_eq!(placer.grid().get(0, 1), Some('t'));
                assert_eq!(placer.grid().get(1, 1), None);
                assert!(placer.is_consistent());
                placer.remove(across);
            }
            assert!(placer.grid().is_blank());
        }
    }

    #[test]
    fn test_identical_span_cannot_be_committed_twice() {
        let mut placer = Placer::new(3).unwrap();
        let _first = placer.place(&word("ab"), 0, 0, Direction::Horizontal).unwrap();
        assert!(!placer.is_valid_position(&word("ab"), 0, 0, Direction::Horizontal));
        // the same word may still cross itself
        assert!(placer.is_valid_position(&word("ab"), 0, 0, Direction::Vertical));
    }

    #[test]
    fn test_contained_word_shares_cells() {
        let mut placer = Placer::new(4).unwrap();
        let _cat = placer.place(&word("cat"), 0, 0, Direction::Horizontal).unwrap();
        let at = placer.place(&word("at"), 0, 1, Direction::Horizontal).unwrap();
        assert_eq!(placer.grid().coverage(0, 1), 2);
        placer.remove(at);
        assert_eq!(placer.grid().format('.'), "c a t .\n. . . .\n. . . .\n. . . .\n");
        assert!(placer.is_consistent());
    }

    #[test]
    fn test_stray_letter_breaks_consistency() {
        let mut placer = Placer::new(4).unwrap();
        let _handle = placer.place(&word("at"), 0, 0, Direction::Horizontal).unwrap();
        assert!(placer.is_consistent());

        // a letter in the last row that no committed placement explains
        let stray = geometry::span(4, 3, 2, Direction::Horizontal, 1).unwrap();
        placer.grid.write(stray, &['z']);
        assert!(!placer.is_consistent());

        let stray = geometry::span(4, 3, 2, Direction::Horizontal, 1).unwrap();
        placer.grid.release(stray);
        assert!(placer.is_consistent());
    }

    #[test]
    #[should_panic(expected = "different placer")]
    fn test_foreign_handle_panics() {
        let mut first = Placer::new(3).unwrap();
        let mut second = Placer::new(3).unwrap();
        let handle = first.place(&word("ab"), 0, 0, Direction::Horizontal).unwrap();
        second.remove(handle);
    }

    #[test]
    fn test_random_place_remove_sequence_stays_consistent() {
        // deterministic walk over a fixed candidate list, undoing in mixed order
        let words = ["cat", "tag", "ant", "gnat", "at", "ta"];
        let mut placer = Placer::new(5).unwrap();
        let mut handles = Vec::new();
        for (i, text) in words.iter().enumerate() {
            let w = word(text);
            'search: for row in 0..5 {
                for col in 0..5 {
                    for direction in Direction::ALL {
                        if (row + col + i) % 3 == 0 {
                            if let Some(handle) = placer.place(&w, row, col, direction) {
                                handles.push(handle);
                                break 'search;
                            }
                        }
                    }
                }
            }
            assert!(placer.is_consistent());
        }
        while !handles.is_empty() {
            let handle = handles.remove(handles.len() / 2);
            placer.remove(handle);
            assert!(placer.is_consistent());
        }
        assert!(placer.grid().is_blank());
    }
}
