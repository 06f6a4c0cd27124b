//! Rat in a maze
//!
//! Find every path from the top-left cell to the bottom-right cell of a grid,
//! moving one cell at a time in the four compass directions and never
//! revisiting a cell. Paths are spelled with the letters `D`, `L`, `R`, `U`
//! and candidates are tried in that order, so `All` yields them sorted.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, CostFn, Outcome, Problem, SearchMode, Workspace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// Generation order
    pub const ORDER: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    pub fn letter(self) -> char {
        match self {
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
        }
    }
}

/// Maze layout. `true` marks an open cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

/// Partial walk through the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeWalk {
    cols: usize,
    visited: Vec<bool>,
    position: (usize, usize),
    path: String,
}

/// Move one cell in `direction`. `to` may lie outside the grid until the
/// feasibility check has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: (usize, usize),
    pub to: (i32, i32),
    pub direction: Direction,
}

impl MazeWalk {
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Letters of the moves taken so far
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        self.visited[row * self.cols + col]
    }
}

impl Workspace for MazeWalk {
    type Edit = Step;

    fn apply(&mut self, step: &Step) {
        let to = (step.to.0 as usize, step.to.1 as usize);
        self.visited[to.0 * self.cols + to.1] = true;
        self.position = to;
        self.path.push(step.direction.letter());
    }

    fn undo(&mut self, step: &Step) {
        let to = (step.to.0 as usize, step.to.1 as usize);
        self.visited[to.0 * self.cols + to.1] = false;
        self.position = step.from;
        self.path.pop();
    }
}

impl Maze {
    /// Build a maze from rows of open (`true`) and blocked cells
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Self, PuzzleError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(PuzzleError::EmptyInput { what: "maze" });
        }
        let rows = cells.len();
        let cols = cells[0].len();
        for (row, line) in cells.iter().enumerate() {
            if line.len() != cols {
                return Err(PuzzleError::RaggedRow {
                    row,
                    found: line.len(),
                    expected: cols,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            open: cells.into_iter().flatten().collect(),
        })
    }

    /// Parse rows written with `1` for open and `0` for blocked cells
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, PuzzleError> {
        let mut cells = Vec::with_capacity(rows.len());
        for line in rows {
            let mut row = Vec::new();
            for (position, ch) in line.as_ref().trim().chars().enumerate() {
                match ch {
                    '1' => row.push(true),
                    '0' => row.push(false),
                    found => {
                        return Err(PuzzleError::InvalidCharacter {
                            what: "maze row",
                            found,
                            position,
                        })
                    }
                }
            }
            cells.push(row);
        }
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn exit(&self) -> (usize, usize) {
        (self.rows - 1, self.cols - 1)
    }

    pub fn is_open(&self, row: i32, col: i32) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.cols
            && self.open[row as usize * self.cols + col as usize]
    }

    fn open_count(&self) -> usize {
        self.open.iter().filter(|&&cell| cell).count()
    }

    /// Every path from the entrance to the exit, in `DLRU` order
    pub fn paths(&self) -> Vec<String> {
        let (mut walk, budget) = self.initial();
        let outcome = search(self, &mut walk, budget, SearchMode::All, None, false);
        outcome.solutions().iter().map(|walk| walk.path.clone()).collect()
    }

    /// First path in `DLRU` order, if any
    pub fn first_path(&self) -> Option<String> {
        let (mut walk, budget) = self.initial();
        match search(self, &mut walk, budget, SearchMode::First, None, false) {
            Outcome::Found(walk) => Some(walk.path),
            _ => None,
        }
    }

    fn distance_to_exit(&self, cell: (i32, i32)) -> u64 {
        let (exit_row, exit_col) = self.exit();
        (exit_row as i32 - cell.0).unsigned_abs() as u64 + (exit_col as i32 - cell.1).unsigned_abs() as u64
    }
}

impl Problem for Maze {
    type Workspace = MazeWalk;
    type Key = ();

    fn moves(&self, walk: &MazeWalk, budget: u32) -> Vec<Step> {
        let (row, col) = walk.position;
        if budget == 0 || !self.is_open(row as i32, col as i32) {
            return Vec::new();
        }
        Direction::ORDER
            .iter()
            .map(|&direction| {
                let (dr, dc) = direction.offset();
                Step {
                    from: walk.position,
                    to: (row as i32 + dr, col as i32 + dc),
                    direction,
                }
            })
            .collect()
    }

    fn feasible(&self, walk: &MazeWalk, step: &Step) -> bool {
        let (row, col) = step.to;
        self.is_open(row, col) && !walk.is_visited(row as usize, col as usize)
    }

    fn is_goal(&self, walk: &MazeWalk, _budget: u32) -> bool {
        let (row, col) = walk.position;
        walk.position == self.exit() && self.is_open(row as i32, col as i32)
    }
}

impl Puzzle for Maze {
    const KIND: PuzzleKind = PuzzleKind::Maze;

    fn initial(&self) -> (MazeWalk, u32) {
        let mut visited = vec![false; self.rows * self.cols];
        visited[0] = true;
        let walk = MazeWalk {
            cols: self.cols,
            visited,
            position: (0, 0),
            path: String::new(),
        };
        (walk, self.open_count().saturating_sub(1) as u32)
    }

    fn render(&self, walk: &MazeWalk) -> String {
        walk.path.clone()
    }

    fn heuristic(&self) -> Option<Box<CostFn<'_, Self>>> {
        Some(Box::new(move |_: &MazeWalk, step: &Step| self.distance_to_exit(step.to)))
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.rows * self.cols,
            max_branching: Direction::ORDER.len(),
            depth_bound: self.open_count().saturating_sub(1),
            memoizable: false,
        }
    }
}
