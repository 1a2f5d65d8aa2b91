//! Crossword Grid Placer Library
//!
//! Places an ordered list of words onto a square grid so that each reads
//! left-to-right or top-to-bottom and crossing words agree on shared letters.

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod log;
pub mod placer;
pub mod solver;
pub mod words;

pub use error::{CrossgridError, Result};
pub use geometry::Direction;
pub use grid::Grid;
pub use placer::{Committed, Placer};
pub use solver::{SolveOptions, SolveReport, SolveStats, SolveStatus};
pub use words::{Placement, Word};

/// Outcome of [`solve_puzzle`]: the final grid and how the search ended.
#[derive(Debug)]
pub struct Puzzle {
    pub grid: Grid,
    pub placements: Vec<Placement>,
    pub report: SolveReport,
}

/// Builds a fresh `size` x `size` grid and places `words` on it in order.
///
/// On failure the returned grid is all blank.
pub fn solve_puzzle(size: usize, words: &[Word], options: SolveOptions) -> Result<Puzzle> {
    let mut placer = Placer::new(size)?;
    let report = placer.solve_with(words, options);
    let placements = placer.committed().cloned().collect();
    Ok(Puzzle {
        grid: placer.into_grid(),
        placements,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_puzzle_success() {
        let words = Word::parse_list(&["abc"], '.').unwrap();
        let puzzle = solve_puzzle(5, &words, SolveOptions::default()).unwrap();
        assert!(puzzle.report.is_solved());
        assert_eq!(puzzle.placements.len(), 1);
        assert_eq!(puzzle.grid.rows('.')[0], vec!['a', 'b', 'c', '.', '.']);
    }

    #[test]
    fn test_solve_puzzle_failure_returns_blank_grid() {
        let words = Word::parse_list(&["abc"], '.').unwrap();
        let puzzle = solve_puzzle(2, &words, SolveOptions::default()).unwrap();
        assert_eq!(puzzle.report.status, SolveStatus::Unsatisfiable);
        assert!(puzzle.placements.is_empty());
        assert!(puzzle.grid.is_blank());
    }

    #[test]
    fn test_solve_puzzle_rejects_zero_size() {
        let err = solve_puzzle(0, &[], SolveOptions::default()).unwrap_err();
        assert!(matches!(err, CrossgridError::InvalidSize(0)));
    }
}
