//! Generic backtracking search
//!
//! One depth-first engine with reversible edits, an engine-owned trail,
//! optional memoization and heuristic ordering, plus adapters for classic
//! puzzles: rat in a maze, knight's tour, m-coloring, word break, expression
//! add operators, remove invalid parentheses and largest number in k swaps.

pub mod config;
pub mod engine;
pub mod logging;
pub mod puzzles;
pub mod solver;
pub mod utils;

pub use config::Settings;
pub use engine::{search, Outcome, Problem, SearchConfig, SearchEngine, SearchMode, Workspace};
pub use solver::{PuzzleRun, RunReport};

use anyhow::Result;

/// Load the configured puzzle and solve it
pub fn solve_puzzle(settings: Settings) -> Result<RunReport> {
    PuzzleRun::new(settings)?.solve()
}
