//! Puzzle families solved by the backtracking engine
//!
//! Each module is a small adapter: a workspace, its reversible edits, and a
//! [`Problem`] implementation supplying the move generator and feasibility
//! check. The [`Puzzle`] trait adds what the front end needs on top.

pub mod coloring;
pub mod error;
pub mod expression;
pub mod io;
pub mod k_swaps;
pub mod knights_tour;
pub mod maze;
pub mod parentheses;
pub mod word_break;

pub use coloring::GraphColoring;
pub use error::PuzzleError;
pub use expression::ExpressionTarget;
pub use io::{
    create_example_puzzles, load_puzzle_from_file, load_puzzles_from_directory, parse_puzzle, save_puzzle_to_file,
    PuzzleSpec,
};
pub use k_swaps::LargestNumber;
pub use knights_tour::KnightsTour;
pub use maze::Maze;
pub use parentheses::ParenthesesRepair;
pub use word_break::WordBreak;

use crate::engine::{CostFn, Problem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Puzzle families known to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Maze,
    KnightsTour,
    Coloring,
    WordBreak,
    Expression,
    Parentheses,
    KSwaps,
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PuzzleKind::Maze => "maze",
            PuzzleKind::KnightsTour => "knights_tour",
            PuzzleKind::Coloring => "coloring",
            PuzzleKind::WordBreak => "word_break",
            PuzzleKind::Expression => "expression",
            PuzzleKind::Parentheses => "parentheses",
            PuzzleKind::KSwaps => "k_swaps",
        };
        f.write_str(name)
    }
}

/// Size figures used to estimate how hard a puzzle is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleShape {
    /// Cells, vertices or characters in the input
    pub size: usize,
    /// Most candidates the move generator can produce in one frame
    pub max_branching: usize,
    /// Longest possible trail
    pub depth_bound: usize,
    pub memoizable: bool,
}

/// A problem the front end can build, solve and render
pub trait Puzzle: Problem + Sync {
    const KIND: PuzzleKind;

    /// Starting workspace and budget
    fn initial(&self) -> (Self::Workspace, u32);

    /// Text form of a workspace snapshot
    fn render(&self, workspace: &Self::Workspace) -> String;

    /// Default candidate ordering, if the family has a useful one
    fn heuristic(&self) -> Option<Box<CostFn<'_, Self>>> {
        None
    }

    fn shape(&self) -> PuzzleShape;
}

/// A puzzle built from a [`PuzzleSpec`], ready to be searched
#[derive(Debug)]
pub enum AnyPuzzle {
    Maze(Maze),
    KnightsTour(KnightsTour),
    Coloring(GraphColoring),
    WordBreak(WordBreak),
    Expression(ExpressionTarget),
    Parentheses(ParenthesesRepair),
    KSwaps(LargestNumber),
}

impl AnyPuzzle {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            AnyPuzzle::Maze(_) => PuzzleKind::Maze,
            AnyPuzzle::KnightsTour(_) => PuzzleKind::KnightsTour,
            AnyPuzzle::Coloring(_) => PuzzleKind::Coloring,
            AnyPuzzle::WordBreak(_) => PuzzleKind::WordBreak,
            AnyPuzzle::Expression(_) => PuzzleKind::Expression,
            AnyPuzzle::Parentheses(_) => PuzzleKind::Parentheses,
            AnyPuzzle::KSwaps(_) => PuzzleKind::KSwaps,
        }
    }

    pub fn shape(&self) -> PuzzleShape {
        match self {
            AnyPuzzle::Maze(p) => p.shape(),
            AnyPuzzle::KnightsTour(p) => p.shape(),
            AnyPuzzle::Coloring(p) => p.shape(),
            AnyPuzzle::WordBreak(p) => p.shape(),
            AnyPuzzle::Expression(p) => p.shape(),
            AnyPuzzle::Parentheses(p) => p.shape(),
            AnyPuzzle::KSwaps(p) => p.shape(),
        }
    }
}
