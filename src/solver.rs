//! Backtracking word placement solver.
//!
//! Words are placed strictly in input order. For each word the candidates are
//! tried row ascending, then column ascending, then horizontal before
//! vertical. A failed branch removes exactly the placement it made before the
//! next candidate is tried, so an unsuccessful search leaves the grid as it
//! was found.
//!
//! The walk is iterative with an explicit frame stack, so deep word lists do
//! not grow the native call stack.

use log::{debug, trace};

use crate::geometry::Direction;
use crate::placer::{Committed, Placer};
use crate::words::Word;

/// Limits applied to a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Give up once the search needs more than this many successful
    /// placements. `None` searches exhaustively.
    pub max_placements: Option<u64>,
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every word was placed; the grid holds the solution.
    Solved,
    /// The search space was exhausted without placing every word.
    Unsatisfiable,
    /// The placement budget ran out before the search finished.
    BudgetExhausted,
}

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub candidates_checked: u64,
    pub placements: u64,
    pub removals: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub status: SolveStatus,
    pub stats: SolveStats,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// One level of the search: the word being placed and where to resume.
struct Frame {
    /// Index into the word list.
    word_index: usize,
    /// Next candidate to try, encoded as `(row * size + col) * 2 + direction`.
    next_candidate: usize,
    /// The placement currently committed for this word, if any.
    committed: Option<Committed>,
}

/// Decodes a candidate index into an anchor and direction, in search order.
#[inline(always)]
fn decode_candidate(size: usize, candidate: usize) -> (usize, usize, Direction) {
    let cell = candidate / Direction::ALL.len();
    let direction = Direction::ALL[candidate % Direction::ALL.len()];
    (cell / size, cell % size, direction)
}

impl Placer {
    /// Places every word, in order, or reports that it cannot.
    ///
    /// On success the grid is left holding the solution. On failure it is
    /// exactly as it was before the call.
    pub fn solve(&mut self, words: &[Word]) -> bool {
        self.solve_with(words, SolveOptions::default()).is_solved()
    }

    /// Like [`Placer::solve`], with a placement budget and search statistics.
    pub fn solve_with(&mut self, words: &[Word], options: SolveOptions) -> SolveReport {
        let mut stats = SolveStats::default();
        debug!(
            "solving {} words on a {}x{} grid (budget: {:?})",
            words.len(),
            self.size(),
            self.size(),
            options.max_placements
        );

        if words.is_empty() {
            return self.finish(SolveStatus::Solved, stats);
        }

        let size = self.size();
        let candidate_count = size * size * Direction::ALL.len();
        let mut search_stack = vec![Frame {
            word_index: 0,
            next_candidate: 0,
            committed: None,
        }];

        while let Some(frame) = search_stack.last_mut() {
            // returning to a frame that holds a placement means the branch below it failed
            if let Some(handle) = frame.committed.take() {
                self.remove(handle);
                stats.removals += 1;
            }

            let word = &words[frame.word_index];
            let mut placed = None;
            let mut over_budget = false;
            while frame.next_candidate < candidate_count {
                let (row, col, direction) = decode_candidate(size, frame.next_candidate);
                stats.candidates_checked += 1;
                if !self.is_valid_position(word, row, col, direction) {
                    frame.next_candidate += 1;
                    continue;
                }
                // the budget is spent only when a valid candidate is about to be placed
                if options
                    .max_placements
                    .is_some_and(|limit| stats.placements >= limit)
                {
                    over_budget = true;
                    break;
                }
                frame.next_candidate += 1;
                placed = self.place(word, row, col, direction);
                break;
            }

            if over_budget {
                self.unwind(&mut search_stack, &mut stats);
                return self.finish(SolveStatus::BudgetExhausted, stats);
            }

            let Some(handle) = placed else {
                trace!("no position left for word {}", frame.word_index);
                search_stack.pop();
                continue;
            };
            stats.placements += 1;
            frame.committed = Some(handle);

            let next_word = frame.word_index + 1;
            if next_word == words.len() {
                // keep the committed placements: they are the solution
                return self.finish(SolveStatus::Solved, stats);
            }
            search_stack.push(Frame {
                word_index: next_word,
                next_candidate: 0,
                committed: None,
            });
        }

        self.finish(SolveStatus::Unsatisfiable, stats)
    }

    /// Removes every placement still held by the stack, innermost first.
    fn unwind(&mut self, search_stack: &mut Vec<Frame>, stats: &mut SolveStats) {
        while let Some(frame) = search_stack.pop() {
            if let Some(handle) = frame.committed {
                self.remove(handle);
                stats.removals += 1;
            }
        }
    }

    fn finish(&self, status: SolveStatus, stats: SolveStats) -> SolveReport {
        debug_assert!(self.is_consistent());
        debug!(
            "search finished: {:?} after {} candidates, {} placements, {} removals",
            status, stats.candidates_checked, stats.placements, stats.removals
        );
        SolveReport { status, stats }
    }
}
